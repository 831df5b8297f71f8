use std::collections::BTreeMap;
use std::time::Duration;

use configtx_core::descriptor::{
    Application, BatchSize, Channel, Consenter, Consortium, EtcdRaft, EtcdRaftOptions, Msp,
    Orderer, Organization, Policy,
};
use configtx_core::txn::{FixedClock, FixedNonce, Framer};
use configtx_core::Address;

/// Standard Readers/Writers/Admins signature policies for one MSP
#[allow(dead_code)]
pub fn org_policies(msp_id: &str) -> BTreeMap<String, Policy> {
    let mut policies = BTreeMap::new();
    policies.insert(
        "Admins".to_string(),
        Policy::signature(format!("OR('{}.admin')", msp_id)),
    );
    policies.insert(
        "Readers".to_string(),
        Policy::signature(format!("OR('{}.member')", msp_id)),
    );
    policies.insert(
        "Writers".to_string(),
        Policy::signature(format!("OR('{}.member')", msp_id)),
    );
    policies
}

/// Section-level ImplicitMeta policies
#[allow(dead_code)]
pub fn implicit_policies() -> BTreeMap<String, Policy> {
    let mut policies = BTreeMap::new();
    policies.insert("Admins".to_string(), Policy::implicit_meta("MAJORITY Admins"));
    policies.insert("Readers".to_string(), Policy::implicit_meta("ANY Readers"));
    policies.insert("Writers".to_string(), Policy::implicit_meta("ANY Writers"));
    policies
}

#[allow(dead_code)]
pub fn msp(msp_id: &str) -> Msp {
    Msp {
        name: msp_id.to_string(),
        root_certs: vec![format!("-----BEGIN CERTIFICATE-----\n{}-root\n-----END CERTIFICATE-----", msp_id)],
        admins: vec![format!("-----BEGIN CERTIFICATE-----\n{}-admin\n-----END CERTIFICATE-----", msp_id)],
        ..Msp::default()
    }
}

#[allow(dead_code)]
pub fn peer_org(name: &str) -> Organization {
    let msp_id = format!("{}MSP", name);
    Organization {
        name: name.to_string(),
        policies: org_policies(&msp_id),
        msp: msp(&msp_id),
        anchor_peers: vec![Address::new(format!("peer0.{}.example.com", name.to_lowercase()), 7051)],
        orderer_endpoints: Vec::new(),
    }
}

#[allow(dead_code)]
pub fn orderer_org(name: &str) -> Organization {
    let msp_id = format!("{}MSP", name);
    Organization {
        name: name.to_string(),
        policies: org_policies(&msp_id),
        msp: msp(&msp_id),
        anchor_peers: Vec::new(),
        orderer_endpoints: vec![format!("orderer.{}.example.com:7050", name.to_lowercase())],
    }
}

#[allow(dead_code)]
pub fn application() -> Application {
    let mut acls = BTreeMap::new();
    acls.insert("peer/Propose".to_string(), "/Channel/Application/Writers".to_string());
    let mut policies = implicit_policies();
    policies.insert(
        "Endorsement".to_string(),
        Policy::implicit_meta("MAJORITY Endorsement"),
    );

    Application {
        organizations: vec![peer_org("Org1"), peer_org("Org2")],
        capabilities: vec!["V2_0".to_string()],
        policies,
        acls,
    }
}

#[allow(dead_code)]
pub fn orderer() -> Orderer {
    let mut policies = implicit_policies();
    policies.insert(
        "BlockValidation".to_string(),
        Policy::implicit_meta("ANY Writers"),
    );

    Orderer {
        orderer_type: "etcdraft".to_string(),
        addresses: vec![Address::new("orderer.example.com", 7050)],
        batch_timeout: Duration::from_secs(2),
        batch_size: BatchSize {
            max_message_count: 500,
            absolute_max_bytes: 10 * 1024 * 1024,
            preferred_max_bytes: 2 * 1024 * 1024,
        },
        etcd_raft: EtcdRaft {
            consenters: vec![Consenter {
                address: Address::new("orderer.example.com", 7050),
                client_tls_cert: "client-pem".to_string(),
                server_tls_cert: "server-pem".to_string(),
            }],
            options: EtcdRaftOptions {
                tick_interval: "500ms".to_string(),
                election_tick: 10,
                heartbeat_tick: 1,
                max_inflight_blocks: 5,
                snapshot_interval_size: 16 * 1024 * 1024,
            },
        },
        organizations: vec![orderer_org("OrdererOrg")],
        max_channels: 10,
        capabilities: vec!["V2_0".to_string()],
        policies,
        ..Orderer::default()
    }
}

/// Channel descriptor for a standard (consortium) channel
#[allow(dead_code)]
pub fn standard_channel() -> Channel {
    Channel {
        consortium: "SampleConsortium".to_string(),
        application: Some(application()),
        ..Channel::default()
    }
}

/// Channel descriptor for a network (system) channel
#[allow(dead_code)]
pub fn system_channel() -> Channel {
    Channel {
        orderer: Some(orderer()),
        consortiums: vec![Consortium {
            name: "SampleConsortium".to_string(),
            organizations: vec![peer_org("Org1"), peer_org("Org2")],
        }],
        capabilities: vec!["V2_0".to_string()],
        policies: implicit_policies(),
        ..Channel::default()
    }
}

/// Channel descriptor for an application channel bootstrapped directly
#[allow(dead_code)]
pub fn application_channel() -> Channel {
    Channel {
        application: Some(application()),
        orderer: Some(orderer()),
        capabilities: vec!["V2_0".to_string()],
        policies: implicit_policies(),
        ..Channel::default()
    }
}

/// Framer with a fixed clock and nonce
#[allow(dead_code)]
pub fn pinned_framer() -> Framer {
    Framer::with_sources(FixedClock(1_700_000_000), FixedNonce(vec![0xAB, 0xCD]))
}

//! Profile parser with validation
//!
//! Parses YAML and validates schema version, organization name uniqueness,
//! address syntax and duration text, then converts the profile into a
//! `Channel` descriptor

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use std::time::Instant;

use configtx_core::descriptor::{
    Application, BatchSize, Channel, Consenter, Consortium, EtcdRaft, EtcdRaftOptions, Kafka,
    Msp, Orderer, Organization, Policy,
};
use configtx_core::duration::parse_duration;
use configtx_core::{log_op_end, log_op_error, log_op_start, parse_address, Address};

use crate::errors::{at_field, io_error, profile_validation, Result};
use crate::format_v0::{
    ProfileApplication, ProfileChannel, ProfileConsortium, ProfileMsp, ProfileOrderer,
    ProfileOrganization, ProfilePolicy, ProfileV0,
};

/// Parse a profile file from a path
pub fn parse_profile_file(path: &Path) -> Result<ProfileV0> {
    let content = fs::read_to_string(path).map_err(|e| io_error("profile_read", e))?;
    parse_profile_str(&content)
}

/// Parse a profile from a string
pub fn parse_profile_str(content: &str) -> Result<ProfileV0> {
    // Parse YAML
    let profile: ProfileV0 = serde_yaml::from_str(content)
        .map_err(|e| profile_validation(&format!("YAML parse error: {}", e)))?;

    // Validate profile
    validate_profile(&profile)?;

    Ok(profile)
}

/// Load the channel descriptor from a profile file
pub fn load_channel_file(path: &Path) -> Result<Channel> {
    instrumented(|| {
        let profile = parse_profile_file(path)?;
        to_channel(&profile.channel)
    })
}

/// Load the channel descriptor from profile text
pub fn load_channel_str(content: &str) -> Result<Channel> {
    instrumented(|| {
        let profile = parse_profile_str(content)?;
        to_channel(&profile.channel)
    })
}

fn instrumented(load: impl FnOnce() -> Result<Channel>) -> Result<Channel> {
    log_op_start!("load_profile");
    let start = Instant::now();

    match load() {
        Ok(channel) => {
            log_op_end!(
                "load_profile",
                duration_ms = start.elapsed().as_millis() as u64
            );
            Ok(channel)
        }
        Err(e) => {
            log_op_error!(
                "load_profile",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(e)
        }
    }
}

/// Validate a parsed profile
fn validate_profile(profile: &ProfileV0) -> Result<()> {
    // Validate schema version
    if profile.schema_version != 0 {
        return Err(profile_validation(&format!(
            "Unsupported schema_version: {}. Expected 0",
            profile.schema_version
        )));
    }

    let channel = &profile.channel;
    if let Some(application) = &channel.application {
        unique_names(
            application.organizations.iter().map(|o| o.name.as_str()),
            "application organization",
        )?;
    }
    if let Some(orderer) = &channel.orderer {
        unique_names(
            orderer.organizations.iter().map(|o| o.name.as_str()),
            "orderer organization",
        )?;
    }
    unique_names(
        channel.consortiums.iter().map(|c| c.name.as_str()),
        "consortium",
    )?;
    for consortium in &channel.consortiums {
        unique_names(
            consortium.organizations.iter().map(|o| o.name.as_str()),
            &format!("organization of consortium {}", consortium.name),
        )?;
    }

    // Address syntax and durations are checked by the conversion
    to_channel(channel).map(|_| ())
}

fn unique_names<'a>(names: impl Iterator<Item = &'a str>, what: &str) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() {
            return Err(profile_validation(&format!("Empty {} name", what)));
        }
        if !seen.insert(name) {
            return Err(profile_validation(&format!("Duplicate {} {}", what, name)));
        }
    }
    Ok(())
}

fn to_channel(channel: &ProfileChannel) -> Result<Channel> {
    Ok(Channel {
        consortium: channel.consortium.clone(),
        application: channel
            .application
            .as_ref()
            .map(to_application)
            .transpose()?,
        orderer: channel.orderer.as_ref().map(to_orderer).transpose()?,
        consortiums: channel
            .consortiums
            .iter()
            .map(to_consortium)
            .collect::<Result<_>>()?,
        capabilities: channel.capabilities.clone(),
        policies: to_policies(&channel.policies),
    })
}

fn to_application(application: &ProfileApplication) -> Result<Application> {
    Ok(Application {
        organizations: to_organizations(&application.organizations, "channel.application")?,
        capabilities: application.capabilities.clone(),
        policies: to_policies(&application.policies),
        acls: application.acls.clone(),
    })
}

fn to_orderer(orderer: &ProfileOrderer) -> Result<Orderer> {
    let location = "channel.orderer";
    let batch_timeout = parse_duration(&orderer.batch_timeout)
        .map_err(|e| at_field(e, &format!("{}.batch_timeout", location)))?;
    parse_duration(&orderer.etcd_raft.options.tick_interval).map_err(|e| {
        at_field(e, &format!("{}.etcd_raft.options.tick_interval", location))
    })?;

    let consenters = orderer
        .etcd_raft
        .consenters
        .iter()
        .enumerate()
        .map(|(i, consenter)| -> Result<Consenter> {
            Ok(Consenter {
                address: to_address(
                    &consenter.address,
                    &format!("{}.etcd_raft.consenters[{}]", location, i),
                )?,
                client_tls_cert: consenter.client_tls_cert.clone(),
                server_tls_cert: consenter.server_tls_cert.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let options = &orderer.etcd_raft.options;

    Ok(Orderer {
        orderer_type: orderer.orderer_type.clone(),
        addresses: to_addresses(&orderer.addresses, &format!("{}.addresses", location))?,
        batch_timeout,
        batch_size: BatchSize {
            max_message_count: orderer.batch_size.max_message_count,
            absolute_max_bytes: orderer.batch_size.absolute_max_bytes,
            preferred_max_bytes: orderer.batch_size.preferred_max_bytes,
        },
        kafka: Kafka {
            brokers: orderer.kafka.brokers.clone(),
        },
        etcd_raft: EtcdRaft {
            consenters,
            options: EtcdRaftOptions {
                tick_interval: options.tick_interval.clone(),
                election_tick: options.election_tick,
                heartbeat_tick: options.heartbeat_tick,
                max_inflight_blocks: options.max_inflight_blocks,
                snapshot_interval_size: options.snapshot_interval_size,
            },
        },
        organizations: to_organizations(&orderer.organizations, location)?,
        max_channels: orderer.max_channels,
        capabilities: orderer.capabilities.clone(),
        policies: to_policies(&orderer.policies),
        state: orderer.state,
    })
}

fn to_consortium(consortium: &ProfileConsortium) -> Result<Consortium> {
    let location = format!("channel.consortiums[{}]", consortium.name);
    Ok(Consortium {
        name: consortium.name.clone(),
        organizations: to_organizations(&consortium.organizations, &location)?,
    })
}

fn to_organizations(orgs: &[ProfileOrganization], section: &str) -> Result<Vec<Organization>> {
    orgs.iter()
        .map(|org| -> Result<Organization> {
            let location = format!("{}.organizations[{}]", section, org.name);
            for endpoint in &org.orderer_endpoints {
                parse_address(endpoint)
                    .map_err(|e| at_field(e, &format!("{}.orderer_endpoints", location)))?;
            }
            Ok(Organization {
                name: org.name.clone(),
                policies: to_policies(&org.policies),
                msp: to_msp(&org.msp),
                anchor_peers: to_addresses(
                    &org.anchor_peers,
                    &format!("{}.anchor_peers", location),
                )?,
                orderer_endpoints: org.orderer_endpoints.clone(),
            })
        })
        .collect()
}

fn to_msp(msp: &ProfileMsp) -> Msp {
    Msp {
        name: msp.id.clone(),
        root_certs: msp.root_certs.clone(),
        intermediate_certs: msp.intermediate_certs.clone(),
        admins: msp.admins.clone(),
        revocation_list: msp.revocation_list.clone(),
        organizational_unit_identifiers: msp.organizational_unit_identifiers.clone(),
        crypto_config: msp.crypto_config.clone().unwrap_or_default(),
        tls_root_certs: msp.tls_root_certs.clone(),
        tls_intermediate_certs: msp.tls_intermediate_certs.clone(),
        node_ous: msp.node_ous.clone(),
    }
}

fn to_policies(policies: &BTreeMap<String, ProfilePolicy>) -> BTreeMap<String, Policy> {
    policies
        .iter()
        .map(|(name, policy)| {
            (
                name.clone(),
                Policy {
                    policy_type: policy.policy_type,
                    rule: policy.rule.clone(),
                },
            )
        })
        .collect()
}

fn to_addresses(addresses: &[String], location: &str) -> Result<Vec<Address>> {
    addresses
        .iter()
        .map(|address| to_address(address, location))
        .collect()
}

fn to_address(address: &str, location: &str) -> Result<Address> {
    parse_address(address).map_err(|e| at_field(e, location))
}

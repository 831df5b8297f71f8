use std::time::Instant;

use crate::builder::{default_config_template, new_channel_group, values};
use crate::codec;
use crate::core_types::keys::{CONSORTIUM_KEY, DEFAULT_MOD_POLICY};
use crate::descriptor::Channel;
use crate::diff::compute_config_update;
use crate::errors::{ConfigError, Result};
use crate::model::{Config, ConfigSignature, ConfigUpdate, ConfigUpdateEnvelope, ConfigValue};
use crate::txn::envelope::{Envelope, HeaderType};
use crate::txn::framer::Framer;
use crate::{log_op_end, log_op_error, log_op_start};

/// Frame a computed update, with any signatures already collected, as an
/// unsigned CONFIG_UPDATE envelope for the update's channel.
///
/// # Errors
///
/// `InvalidChannelId` if the update has no channel id; `Serialization` if
/// framing fails.
pub fn new_config_update_envelope(
    framer: &Framer,
    update: &ConfigUpdate,
    signatures: Vec<ConfigSignature>,
) -> Result<Envelope> {
    if update.channel_id.is_empty() {
        return Err(ConfigError::EmptyChannelId.into());
    }
    let data = ConfigUpdateEnvelope {
        config_update: codec::marshal("ConfigUpdate", update)?,
        signatures,
    };
    framer.frame(
        HeaderType::ConfigUpdate,
        &update.channel_id,
        &[],
        "ConfigUpdateEnvelope",
        &data,
    )
}

/// Unsigned channel creation transaction for `channel_id`.
///
/// # Errors
///
/// `InvalidChannelId` for an empty channel id, `MissingField` if the
/// channel names no consortium or has no Application section, or any
/// builder error.
pub fn new_create_channel_tx(channel: &Channel, channel_id: &str) -> Result<Envelope> {
    new_create_channel_tx_with(&Framer::system(), channel, channel_id)
}

/// [`new_create_channel_tx`] with an explicit framer
///
/// # Errors
///
/// Same as [`new_create_channel_tx`].
pub fn new_create_channel_tx_with(
    framer: &Framer,
    channel: &Channel,
    channel_id: &str,
) -> Result<Envelope> {
    log_op_start!("new_create_channel_tx", channel_id = channel_id);
    let start = Instant::now();

    let envelope = create_channel_tx(framer, channel, channel_id).map_err(|e| {
        log_op_error!(
            "new_create_channel_tx",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            channel_id = channel_id
        );
        e
    })?;

    log_op_end!(
        "new_create_channel_tx",
        duration_ms = start.elapsed().as_millis() as u64,
        channel_id = channel_id
    );
    Ok(envelope)
}

fn create_channel_tx(framer: &Framer, channel: &Channel, channel_id: &str) -> Result<Envelope> {
    if channel_id.is_empty() {
        return Err(ConfigError::EmptyChannelId.into());
    }
    let update = channel_create_update(channel, channel_id)?;
    new_config_update_envelope(framer, &update, Vec::new())
}

/// Diff the creation template against the full standard root, then name
/// the consortium in the write set at version 0 as channel creation
/// requires. The read set keeps the same value at version 0.
fn channel_create_update(channel: &Channel, channel_id: &str) -> Result<ConfigUpdate> {
    let template = default_config_template(channel)?;
    let target = new_channel_group(channel)?;

    let mut update = compute_config_update(&Config::new(template), &Config::new(target))
        .map_err(|e| e.context("new_create_channel_tx", "computing channel creation update"))?;
    update.channel_id = channel_id.to_string();

    let consortium = values::consortium_value(&channel.consortium)?;
    let pinned = ConfigValue::new(consortium.value, DEFAULT_MOD_POLICY);
    update
        .read_set
        .values
        .entry(CONSORTIUM_KEY.to_string())
        .or_insert_with(|| pinned.clone());
    update.write_set.insert_value(CONSORTIUM_KEY, pinned);

    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Application, Organization, Policy};
    use crate::errors::ExErrorKind;
    use crate::txn::{FixedClock, FixedNonce};
    use std::collections::BTreeMap;

    fn channel() -> Channel {
        let mut policies = BTreeMap::new();
        policies.insert("Admins".to_string(), Policy::implicit_meta("MAJORITY Admins"));
        Channel {
            consortium: "SampleConsortium".to_string(),
            application: Some(Application {
                organizations: vec![Organization {
                    name: "Org1".to_string(),
                    ..Organization::default()
                }],
                policies,
                ..Application::default()
            }),
            ..Channel::default()
        }
    }

    fn framer() -> Framer {
        Framer::with_sources(FixedClock(0), FixedNonce(vec![1, 2, 3]))
    }

    #[test]
    fn test_create_update_pins_consortium_and_writes_application_policies() {
        let update = channel_create_update(&channel(), "mychannel").unwrap();

        assert_eq!(update.channel_id, "mychannel");
        assert_eq!(update.read_set.value(CONSORTIUM_KEY).unwrap().version, 0);
        assert_eq!(update.write_set.value(CONSORTIUM_KEY).unwrap().version, 0);

        let app = update.write_set.group("Application").unwrap();
        assert_eq!(app.version, 1);
        assert_eq!(app.policy("Admins").unwrap().version, 0);
        assert!(app.group("Org1").is_none());
        assert!(update.read_set.group_at(&["Application", "Org1"]).is_some());
    }

    #[test]
    fn test_create_channel_tx_frames_config_update() {
        let envelope = new_create_channel_tx_with(&framer(), &channel(), "mychannel").unwrap();
        let payload = envelope.open().unwrap();
        let header = payload.channel_header().unwrap();
        assert_eq!(header.header_type, HeaderType::ConfigUpdate);
        assert_eq!(header.channel_id, "mychannel");

        let data: ConfigUpdateEnvelope = codec::unmarshal("ConfigUpdateEnvelope", &payload.data).unwrap();
        let update: ConfigUpdate = codec::unmarshal("ConfigUpdate", &data.config_update).unwrap();
        assert_eq!(update.channel_id, "mychannel");
        assert!(data.signatures.is_empty());
    }

    #[test]
    fn test_create_channel_tx_requires_channel_id() {
        let err = new_create_channel_tx_with(&framer(), &channel(), "").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidChannelId);
    }
}

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{pinned_framer, standard_channel, system_channel};
use configtx_core::builder::new_channel_group;
use configtx_core::core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_ERR_CODE, FIELD_WRITE_SET_LEN,
};
use configtx_core::genesis::new_system_channel_genesis_block_with;
use configtx_core::logging_facility::test_capture::init_test_capture;
use configtx_core::txn::new_create_channel_tx_with;
use configtx_core::{log_op_end, log_op_error, log_op_start, Config, ConfigTx, ExErrorKind};

#[test]
fn test_log_macros_emit_schema_fields() {
    let capture = init_test_capture();
    let op = "logging_test_macro_fields";

    log_op_start!(op, channel_id = "macro-channel");
    log_op_end!(op, duration_ms = 7, channel_id = "macro-channel");

    let events = capture.events_for_op(op);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[0].channel_id.as_deref(), Some("macro-channel"));
    assert_eq!(events[1].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[1].duration_ms(), Some(7));
}

#[test]
fn test_log_op_error_records_error_code() {
    let capture = init_test_capture();
    let op = "logging_test_error_code";

    log_op_error!(
        op,
        configtx_core::ExError::new(ExErrorKind::InvalidPolicy),
        duration_ms = 0
    );

    let events = capture.events_for_op(op);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(events[0].field(FIELD_ERR_CODE), Some("ERR_INVALID_POLICY"));
}

#[test]
fn test_compute_update_logs_start_and_end() {
    let capture = init_test_capture();
    let tx = ConfigTx::new(Config::new(new_channel_group(&standard_channel()).unwrap()));

    tx.compute_update("logging-compute-ok").unwrap();

    let events: Vec<_> = capture
        .events_for_op("compute_update")
        .into_iter()
        .filter(|e| e.channel_id.as_deref() == Some("logging-compute-ok"))
        .collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[1].event.as_deref(), Some(EVENT_END));
    assert!(events[1].duration_ms().is_some());

    let diff_ends: Vec<_> = capture
        .events_for_op("compute_config_update")
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();
    assert!(!diff_ends.is_empty());
    assert!(diff_ends.iter().all(|e| e.field(FIELD_WRITE_SET_LEN).is_some()));
}

#[test]
fn test_genesis_failure_logs_end_error() {
    let capture = init_test_capture();
    let mut channel = system_channel();
    channel.capabilities.clear();

    new_system_channel_genesis_block_with(&pinned_framer(), &channel, "logging-genesis-err")
        .unwrap_err();

    let errors: Vec<_> = capture
        .events_for_op("new_system_channel_genesis_block")
        .into_iter()
        .filter(|e| e.channel_id.as_deref() == Some("logging-genesis-err"))
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field(FIELD_ERR_CODE), Some("ERR_MISSING_FIELD"));
}

#[test]
fn test_create_channel_tx_logs_boundaries() {
    let capture = init_test_capture();

    new_create_channel_tx_with(&pinned_framer(), &standard_channel(), "logging-create-ok")
        .unwrap();

    let events: Vec<_> = capture
        .events_for_op("new_create_channel_tx")
        .into_iter()
        .filter(|e| e.channel_id.as_deref() == Some("logging-create-ok"))
        .collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].event.as_deref(), Some(EVENT_END));
}

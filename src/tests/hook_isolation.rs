//! Hook ordering and fault isolation around dispatch
//!
//! Covers:
//! - before hooks run ahead of the sink write, after hooks behind it
//! - a failing or panicking hook stops neither its phase, the write, nor the after phase
//! - suppressed calls run no hooks at all
//! - `apply` reinstalls both lists every time
//! - exporting hooks surface writer and serializer errors as failures

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use super::test_utils::{memory_logger, FailingHook, JournalHook};
use crate::config::OptionsPatch;
use crate::errors::HookError;
use crate::hooks::{FnHook, HookAction, HookPhase, LoggerHook, RecordingHook};
use crate::log_args;
use crate::log_level::LogLevel;
use crate::log_sink::Channel;
use crate::logger::Dispatch;

#[test]
fn test_hooks_run_in_list_order_around_emission() {
    let journal = Arc::new(Mutex::new(Vec::new()));
    let before: Vec<Arc<dyn LoggerHook>> = vec![
        JournalHook::new("b1", &journal),
        JournalHook::new("b2", &journal),
    ];
    let after: Vec<Arc<dyn LoggerHook>> = vec![JournalHook::new("a1", &journal)];

    let (logger, sink) = memory_logger(
        OptionsPatch::new()
            .with_before_hooks(before)
            .with_after_hooks(after),
    );

    logger.warn(["careful"]);

    assert_eq!(
        *journal.lock().unwrap(),
        vec!["b1:warn", "b2:warn", "a1:warn"]
    );
    assert_eq!(sink.lines(), vec!["warn | careful"]);
}

#[test]
fn test_failing_before_hook_does_not_block_anything() {
    let erroring = FailingHook::erroring();
    let panicking = FailingHook::panicking();
    let trailing = Arc::new(RecordingHook::new());
    let after = Arc::new(RecordingHook::new());

    let before: Vec<Arc<dyn LoggerHook>> =
        vec![erroring.clone(), panicking.clone(), trailing.clone()];
    let after_list: Vec<Arc<dyn LoggerHook>> = vec![after.clone()];

    let (logger, sink) = memory_logger(
        OptionsPatch::new()
            .with_before_hooks(before)
            .with_after_hooks(after_list),
    );

    let outcome = logger.error(log_args!["db down", 503]);

    assert_eq!(erroring.runs(), 1);
    assert_eq!(panicking.runs(), 1);
    assert_eq!(trailing.events().len(), 1);
    assert_eq!(sink.lines(), vec!["error | db down 503"]);
    assert_eq!(after.events().len(), 1);

    let failures = outcome.hook_failures();
    assert_eq!(failures.len(), 2);
    assert!(failures.iter().all(|f| f.phase == HookPhase::Before));
    assert!(failures.iter().all(|f| f.action == HookAction::Run));
    assert!(matches!(failures[1].error, HookError::Panicked { .. }));
}

#[test]
fn test_failing_after_hook_keeps_later_after_hooks() {
    let erroring = FailingHook::erroring();
    let trailing = Arc::new(RecordingHook::new());
    let after: Vec<Arc<dyn LoggerHook>> = vec![erroring.clone(), trailing.clone()];

    let (logger, sink) = memory_logger(OptionsPatch::new().with_after_hooks(after));
    let outcome = logger.info(["ok"]);

    assert_eq!(sink.len(), 1);
    assert_eq!(trailing.events().len(), 1);
    assert_eq!(outcome.hook_failures().len(), 1);
    assert_eq!(outcome.hook_failures()[0].phase, HookPhase::After);
}

#[test]
fn test_suppressed_calls_run_no_hooks() {
    let before = Arc::new(RecordingHook::new());
    let after = Arc::new(RecordingHook::new());
    let (logger, sink) = memory_logger(
        OptionsPatch::new()
            .with_level(LogLevel::Error)
            .with_before_hooks(vec![before.clone() as Arc<dyn LoggerHook>])
            .with_after_hooks(vec![after.clone() as Arc<dyn LoggerHook>]),
    );

    assert!(matches!(logger.warn(["below"]), Dispatch::Suppressed));
    assert!(before.events().is_empty());
    assert!(after.events().is_empty());
    assert!(sink.is_empty());
}

#[test]
fn test_hooks_see_level_and_arguments() {
    let recorder = Arc::new(RecordingHook::new());
    let (logger, _sink) = memory_logger(
        OptionsPatch::new().with_before_hooks(vec![recorder.clone() as Arc<dyn LoggerHook>]),
    );

    logger.log(log_args!["job", 12, "finished"]);

    let events = recorder.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, LogLevel::Log);
    assert_eq!(events[0].argument_array, log_args!["job", 12, "finished"]);
}

#[test]
fn test_apply_reinstalls_both_lists() {
    let before = Arc::new(RecordingHook::new());
    let after = Arc::new(RecordingHook::new());
    let (mut logger, _sink) = memory_logger(
        OptionsPatch::new()
            .with_before_hooks(vec![before.clone() as Arc<dyn LoggerHook>])
            .with_after_hooks(vec![after.clone() as Arc<dyn LoggerHook>]),
    );
    assert_eq!(before.installs(), 1);
    assert_eq!(after.installs(), 1);

    logger.apply(OptionsPatch::new().with_level(LogLevel::Info));
    assert_eq!(before.installs(), 2);
    assert_eq!(after.installs(), 2);
}

#[test]
fn test_install_failure_does_not_abort_apply() {
    let bad = FailingHook::bad_install();
    let good = Arc::new(RecordingHook::new());
    let (mut logger, _sink) = memory_logger(OptionsPatch::new());

    let failures = logger.apply(
        OptionsPatch::new()
            .with_level(LogLevel::Warn)
            .with_before_hooks(vec![bad as Arc<dyn LoggerHook>])
            .with_after_hooks(vec![good.clone() as Arc<dyn LoggerHook>]),
    );

    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].action, HookAction::Install);
    assert_eq!(failures[0].phase, HookPhase::Before);
    assert_eq!(good.installs(), 1);
    assert_eq!(logger.level(), LogLevel::Warn);
}

#[test]
fn test_emission_channel_is_reported() {
    let (logger, _sink) = memory_logger(OptionsPatch::new());
    match logger.debug(["x"]) {
        Dispatch::Emitted { channel, hook_failures } => {
            assert_eq!(channel, Channel::Dedicated(LogLevel::Debug));
            assert!(hook_failures.is_empty());
        }
        Dispatch::Suppressed => panic!("debug should pass the default threshold"),
    }
}

/// Writer whose every write fails, like a pipe whose reader went away.
struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_export_hooks_report_writer_and_serializer_errors() {
    let line_export = FnHook::new("line-export", |event| {
        writeln!(ClosedPipe, "{}", event.message())?;
        Ok(())
    });
    let json_export = FnHook::new("json-export", |event| {
        serde_json::to_writer(ClosedPipe, event)?;
        Ok(())
    });
    let trailing = Arc::new(RecordingHook::new());
    let after: Vec<Arc<dyn LoggerHook>> =
        vec![Arc::new(line_export), Arc::new(json_export), trailing.clone()];

    let (logger, sink) = memory_logger(OptionsPatch::new().with_after_hooks(after));
    let outcome = logger.info(log_args!["shipped", 3]);

    assert_eq!(sink.lines(), vec!["info | shipped 3"]);
    assert_eq!(trailing.events().len(), 1);

    let failures = outcome.hook_failures();
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].hook, "line-export");
    assert!(matches!(
        failures[0].error,
        HookError::Io(ref err) if err.kind() == io::ErrorKind::BrokenPipe
    ));
    assert_eq!(failures[1].hook, "json-export");
    assert!(matches!(
        failures[1].error,
        HookError::Failed { ref message } if message.starts_with("serialization failed")
    ));
    assert!(failures[1].to_string().contains("reader closed"));
}

//! In-memory capture of log events for tests
//!
//! Installs a subscriber layer that keeps every event so tests can assert on
//! operation boundaries and on the persistence decisions that were logged.

use exechist_core_types::schema::{
    FIELD_COMPONENT, FIELD_EVENT, FIELD_IDENTITY, FIELD_OP, FIELD_STORED,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded event, every field rendered as a string
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn component(&self) -> Option<&str> {
        self.field(FIELD_COMPONENT)
    }

    pub fn op(&self) -> Option<&str> {
        self.field(FIELD_OP)
    }

    pub fn event(&self) -> Option<&str> {
        self.field(FIELD_EVENT)
    }

    pub fn identity(&self) -> Option<&str> {
        self.field(FIELD_IDENTITY)
    }

    /// True for the boundary event `event` of operation `op`
    pub fn is(&self, op: &str, event: &str) -> bool {
        self.op() == Some(op) && self.event() == Some(event)
    }
}

struct FieldVisitor<'a>(&'a mut HashMap<String, String>);

impl FieldVisitor<'_> {
    fn put(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }
}

struct CaptureLayer {
    sink: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut FieldVisitor(&mut fields));

        if let Ok(mut sink) = self.sink.lock() {
            sink.push(CapturedEvent {
                level: *event.metadata().level(),
                fields,
            });
        }
    }
}

/// Shared handle onto the captured events
#[derive(Clone)]
pub struct TestCapture {
    sink: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.sink.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events tagged with one work identity
    ///
    /// Tests share a single global capture and run in parallel; a unique
    /// identity per test keeps their assertions apart.
    pub fn events_for_identity(&self, identity: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.identity() == Some(identity))
            .collect()
    }

    /// First boundary event `event` of operation `op`
    pub fn find(&self, op: &str, event: &str) -> Option<CapturedEvent> {
        self.events().into_iter().find(|e| e.is(op, event))
    }

    /// The logged persistence decision for one work identity
    pub fn decision_for(&self, identity: &str) -> Option<CapturedEvent> {
        self.events_for_identity(identity)
            .into_iter()
            .find(|e| e.field(FIELD_STORED).is_some())
    }

    /// # Panics
    ///
    /// Panics if no event `event` was logged for operation `op`
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is(op, event)),
            "Expected event op={} event={} among {} captured events",
            op,
            event,
            events.len()
        );
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber (once) and return its handle
///
/// ```
/// use exechist_core::logging_facility::test_capture::init_test_capture;
/// use exechist_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_example_op");
/// capture.assert_event_exists("doc_example_op", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let sink = Arc::new(Mutex::new(Vec::new()));
            let layer = CaptureLayer { sink: sink.clone() };
            tracing_subscriber::registry().with(layer).try_init().ok();
            TestCapture { sink }
        })
        .clone()
}

use super::{EmitError, Emitter, Target};
use crate::aggregate::AggregateModel;

/// Canonical data file: one object keyed by JSON key, two-space indentation.
/// Keys of the object and of every record are emitted in sorted order.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEmitter;

impl Emitter for JsonEmitter {
    fn target(&self) -> Target {
        Target::Data
    }

    fn render(&self, model: &AggregateModel) -> Result<String, EmitError> {
        let mut rendered = serde_json::to_string_pretty(model.data())?;
        rendered.push('\n');
        Ok(rendered)
    }
}

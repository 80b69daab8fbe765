//! Data model shared by inference, the platform client and the pipeline.

mod blueprint;
mod record;

pub use blueprint::{
    Blueprint, Constraint, EnumOption, FieldConfig, FieldDescriptor, FieldType, BLUEPRINT_NAME,
};
pub use record::{Cell, Record, RecordValues};

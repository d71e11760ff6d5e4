//! Decoders from score markup into the document model
//!
//! Each decoder is called with the cursor on the element it decodes and
//! consumes that element completely. Tags a decoder does not recognize fall
//! through to shared property readers and finally to `XmlReader::unknown`,
//! which records them instead of failing.

pub mod beam;
pub mod boxes;
pub mod chord;
pub mod compat;
pub mod context;
pub mod dispatch;
pub mod harmony;
pub mod item;
pub mod line;
pub mod property;
pub mod score;
pub mod signature;
pub mod spanner;
pub mod staff;
pub mod symbol;
pub mod text;

pub use context::{LayoutNotify, ReadContext, StaffInfo};
pub use dispatch::read_element;
pub use score::{read_score, read_score_file, read_score_with_layout_notify, read_score_with_settings, ReadResult};

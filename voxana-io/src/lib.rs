//! voxana-io: JSON event file I/O for voxana.
//!
//! Events arrive as JSON produced by the upstream reconstruction:
//! per-event voxels plus the track topologies built from them. The
//! reader validates the records and hands out core types; the writer
//! emits per-event analysis summaries.
//!

mod error;
mod reader;
mod schema;
mod writer;

pub use error::{Error, Result};
pub use reader::{read_events, Event, EventFileReader, TrackTopology};
pub use schema::{EventRecord, SummaryRecord, TrackRecord, VoxelRecord};
pub use writer::SummaryWriter;

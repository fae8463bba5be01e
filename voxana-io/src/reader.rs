//! Event file reading and validation.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use voxana_core::{Track, VoxelData, VoxelId};

use crate::schema::{EventRecord, TrackRecord, VoxelRecord};
use crate::{Error, Result};

/// A track's topology, resolved against the event's voxel set on
/// demand so node energies always reflect the current voxel energies.
#[derive(Debug, Clone)]
pub struct TrackTopology {
    node_ids: Vec<VoxelId>,
    edges: Vec<(usize, usize)>,
}

impl TrackTopology {
    /// Builds a [`Track`] whose nodes carry the energies in `voxels`.
    ///
    /// # Errors
    /// [`Error::InvalidRecord`] if a node id is absent from `voxels`.
    pub fn materialize(&self, voxels: &[VoxelData]) -> Result<Track> {
        let by_id: HashMap<VoxelId, &VoxelData> = voxels.iter().map(|v| (v.id, v)).collect();
        let nodes = self
            .node_ids
            .iter()
            .map(|id| {
                by_id.get(id).map(|&v| *v).ok_or_else(|| {
                    Error::InvalidRecord(format!("track references unknown voxel {id}"))
                })
            })
            .collect::<Result<Vec<VoxelData>>>()?;
        Ok(Track::from_parts(nodes, self.edges.clone()))
    }
}

/// A validated event: voxels plus externally built track topologies.
#[derive(Debug, Clone)]
pub struct Event {
    /// Event number from the input file.
    pub id: u64,
    /// Voxels in upstream order.
    pub voxels: Vec<VoxelData>,
    /// Track topologies to materialize after redistribution.
    pub tracks: Vec<TrackTopology>,
}

/// Reader for JSON event files.
pub struct EventFileReader {
    reader: BufReader<File>,
}

impl EventFileReader {
    /// Opens an event file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            reader: BufReader::new(file),
        })
    }

    /// Reads and validates every event in the file.
    pub fn read_all(self) -> Result<Vec<Event>> {
        let records: Vec<EventRecord> = serde_json::from_reader(self.reader)?;
        records.into_iter().map(validate_event).collect()
    }
}

/// Convenience wrapper: open a file and read all events.
pub fn read_events<P: AsRef<Path>>(path: P) -> Result<Vec<Event>> {
    EventFileReader::open(path)?.read_all()
}

fn validate_event(record: EventRecord) -> Result<Event> {
    let mut voxels = Vec::with_capacity(record.voxels.len());
    let mut seen: HashSet<u32> = HashSet::with_capacity(record.voxels.len());
    for VoxelRecord {
        id,
        x,
        y,
        z,
        energy,
        negligible,
    } in record.voxels
    {
        if !energy.is_finite() || energy < 0.0 {
            return Err(voxana_core::Error::InvalidEnergy {
                id: VoxelId::new(id),
                energy,
            }
            .into());
        }
        if !seen.insert(id) {
            return Err(voxana_core::Error::DuplicateVoxelId(VoxelId::new(id)).into());
        }
        voxels.push(VoxelData::new(id, x, y, z, energy, negligible));
    }

    let tracks = record
        .tracks
        .into_iter()
        .map(|track| validate_track(record.id, &track, &seen))
        .collect::<Result<Vec<TrackTopology>>>()?;

    Ok(Event {
        id: record.id,
        voxels,
        tracks,
    })
}

fn validate_track(
    event: u64,
    record: &TrackRecord,
    known_ids: &HashSet<u32>,
) -> Result<TrackTopology> {
    for &id in &record.nodes {
        if !known_ids.contains(&id) {
            return Err(Error::InvalidRecord(format!(
                "event {event}: track references unknown voxel {id}"
            )));
        }
    }
    for &(a, b) in &record.edges {
        if a >= record.nodes.len() || b >= record.nodes.len() {
            return Err(Error::InvalidRecord(format!(
                "event {event}: edge ({a}, {b}) out of bounds for {} nodes",
                record.nodes.len()
            )));
        }
    }
    Ok(TrackTopology {
        node_ids: record.nodes.iter().map(|&id| VoxelId::new(id)).collect(),
        edges: record.edges.clone(),
    })
}

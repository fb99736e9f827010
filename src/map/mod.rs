//! Map rendering collaborator.
//!
//! Rendering, tiles, and gestures live outside this crate. The controller only
//! tells the map where to go; implementations decide how to draw it.

use std::time::Duration;

use log::info;

use crate::region::{Marker, Region};

/// Receives imperative "animate to region" instructions.
///
/// Implementations must not block: the controller calls this on the task that
/// completed the search.
pub trait MapView: Send + Sync {
    /// Animates from the current view to `region` over `duration`.
    fn animate_to_region(&self, region: &Region, duration: Duration);
}

impl<M: MapView + ?Sized> MapView for std::sync::Arc<M> {
    fn animate_to_region(&self, region: &Region, duration: Duration) {
        (**self).animate_to_region(region, duration)
    }
}

/// Map collaborator that logs each instruction and the marker it would draw.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingMapView;

impl MapView for LoggingMapView {
    fn animate_to_region(&self, region: &Region, duration: Duration) {
        let marker = Marker::at(region);
        info!(
            "Map animating to {} over {}ms; marker '{}' ({})",
            region,
            duration.as_millis(),
            marker.title,
            marker.description
        );
    }
}

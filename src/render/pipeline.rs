//! Per-frame pipeline stages.
//!
//! ```text
//! world polygons --shade--> coloured world polygons
//!   --project/clip/divide--> NDC polygons
//!   --cull (optional)--> front faces
//!   --to_screen--> pixel-space polygons for the rasterizer
//! ```
//!
//! Every stage treats polygons independently and runs on the rayon pool.
//! Polygons that cannot continue (no normal, nothing left after clipping)
//! are dropped, never reported as errors.

use log::trace;
use rayon::prelude::*;

use crate::clipper::ClipSpaceClipper;
use crate::math::Mat4;
use crate::model::Model;
use crate::polygon::{Polygon, ShadedPolygon};
use crate::shading::Illumination;

/// Flat-shades every face of every model.
pub fn shade(models: &[Model], illumination: &Illumination) -> Vec<ShadedPolygon> {
    models
        .par_iter()
        .flat_map_iter(|model| {
            let material = *model.material();
            model.polygons().filter_map(move |polygon| {
                let color = illumination.shade(&polygon, &material)?;
                Some(ShadedPolygon::new(polygon, color))
            })
        })
        .collect()
}

/// Projects into clip space, clips against the view volume and divides by w.
pub fn project_clip_divide(polygons: &[ShadedPolygon], view_projection: &Mat4) -> Vec<ShadedPolygon> {
    let clipper = ClipSpaceClipper::new();
    polygons
        .par_iter()
        .filter_map(|shaded| {
            let clip = shaded.polygon.transformed(view_projection);
            let clipped = clipper.clip_polygon(&clip)?;
            let divided = clipped.perspective_divide()?;
            Some(ShadedPolygon::new(divided, shaded.color))
        })
        .collect()
}

/// Same as [`project_clip_divide`] for uncoloured polygons (wireframe).
pub fn project_clip_divide_outlines(polygons: &[Polygon<4>], view_projection: &Mat4) -> Vec<Polygon<4>> {
    let clipper = ClipSpaceClipper::new();
    polygons
        .par_iter()
        .filter_map(|polygon| {
            clipper
                .clip_polygon(&polygon.transformed(view_projection))?
                .perspective_divide()
        })
        .collect()
}

/// A polygon faces away from the eye when its normal in the left-handed
/// post-projection space has `z >= 0`, i.e. it winds counter-clockwise on
/// screen. Polygons without a normal are treated as back faces.
pub fn is_back_face(polygon: &Polygon<4>) -> bool {
    polygon.raw_normal().map_or(true, |n| n.z() >= 0.0)
}

/// Drops back faces.
pub fn cull_back_faces(polygons: Vec<ShadedPolygon>) -> Vec<ShadedPolygon> {
    let before = polygons.len();
    let kept: Vec<ShadedPolygon> = polygons
        .into_par_iter()
        .filter(|shaded| !is_back_face(&shaded.polygon))
        .collect();
    trace!("culled {} of {} polygons", before - kept.len(), before);
    kept
}

/// Maps NDC polygons to pixel space, on the rayon pool above
/// `parallel_threshold` polygons.
pub fn to_screen(polygons: &[ShadedPolygon], to_screen: &Mat4, parallel_threshold: usize) -> Vec<ShadedPolygon> {
    if polygons.len() > parallel_threshold {
        polygons.par_iter().map(|p| p.transformed(to_screen)).collect()
    } else {
        polygons.iter().map(|p| p.transformed(to_screen)).collect()
    }
}

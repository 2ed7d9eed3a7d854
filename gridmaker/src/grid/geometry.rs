//! Planar layout of grid cells.
//!
//! The grid is laid out in a conformal planar projection:
//!
//! 1. Walk `cell_size * columns` meters from the origin along the row-axis
//!    bearing to find the top-right anchor.
//! 2. Project origin and anchor; the angle between them is the planar
//!    rotation `theta`, and their distance divided by the ground distance is
//!    the local scale of the projection.
//! 3. Lay out cell corners at `(j * step, -i * step)`, rotate by `theta` and
//!    translate to the projected origin.
//! 4. Each cell ring is `p`, `p + row`, `p + row + col`, `p + col`, `p`,
//!    unprojected back to longitude/latitude.

use tracing::debug;

use super::error::GridError;
use super::types::GridParameters;
use crate::coord::{destination_point, row_axis_bearing, GeoPoint};
use crate::projection::PlanarProjection;

type Xy = (f64, f64);

/// Cell rings for every cell in row-major order, plus the planar layout used.
#[derive(Debug, Clone)]
pub struct GridLayout {
    /// Planar rotation of the row axis, radians, counter-clockwise from +x
    pub theta: f64,
    /// Planar units per ground meter near the origin
    pub scale: f64,
    /// Planar vector from a cell corner to the next column's corner
    pub column_step: Xy,
    /// Planar vector from a cell corner to the next row's corner
    pub row_step: Xy,
    pub rings: Vec<[GeoPoint; 5]>,
}

fn rotate((x, y): Xy, theta: f64) -> Xy {
    let (sin, cos) = theta.sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}

fn add(a: Xy, b: Xy) -> Xy {
    (a.0 + b.0, a.1 + b.1)
}

fn sub(a: Xy, b: Xy) -> Xy {
    (a.0 - b.0, a.1 - b.1)
}

/// Fails when any outer corner of the grid lies past ±180° longitude.
///
/// `destination_point` leaves longitudes unwrapped, so a corner beyond the
/// antimeridian shows up as `|lon| > 180`. Projections wrap such points to
/// the far side of the world, which would tear the planar layout apart.
fn reject_antimeridian_crossing(
    params: &GridParameters,
    origin: GeoPoint,
    anchor: GeoPoint,
    bearing: f64,
) -> Result<(), GridError> {
    let column_length_m = params.cell_size_m * params.row_count as f64;
    let down = (bearing + 90.0).rem_euclid(360.0);
    let corners = [
        anchor,
        destination_point(origin, column_length_m, down),
        destination_point(anchor, column_length_m, down),
    ];
    if corners.iter().any(|c| c.lon.abs() > 180.0) {
        return Err(GridError::invalid(
            "longitude",
            params.origin_longitude,
            "grid crosses the antimeridian",
        ));
    }
    Ok(())
}

/// Builds every cell ring for `params` in `projection`.
///
/// Grids that would cross the antimeridian are rejected with
/// [`GridError::InvalidParameter`].
pub fn build_layout(
    params: &GridParameters,
    projection: &PlanarProjection,
) -> Result<GridLayout, GridError> {
    params.validate()?;
    if params.column_count < 2 {
        return Err(GridError::DegenerateGrid {
            columns: params.column_count,
        });
    }

    let rows = params.row_count;
    let cols = params.column_count;
    let cell = params.cell_size_m;

    let origin = params.origin();
    let row_length_m = cell * cols as f64;
    let bearing = row_axis_bearing(params.rotation_degrees);
    let anchor = destination_point(origin, row_length_m, bearing);
    reject_antimeridian_crossing(params, origin, anchor, bearing)?;

    let origin_xy = projection.project(origin)?;
    let anchor_xy = projection.project(anchor)?;
    let (dx, dy) = sub(anchor_xy, origin_xy);
    let planar_length = dx.hypot(dy);
    if !planar_length.is_finite() || planar_length == 0.0 {
        return Err(GridError::invalid(
            "cell_size",
            cell,
            "grid row collapses to a point in the selected projection",
        ));
    }
    let theta = dy.atan2(dx);
    let scale = planar_length / row_length_m;
    let step = cell * scale;

    let corners: Vec<Xy> = (0..rows)
        .flat_map(|i| (0..cols).map(move |j| (j as f64 * step, -(i as f64) * step)))
        .map(|offset| add(rotate(offset, theta), origin_xy))
        .collect();

    let column_step = sub(corners[1], corners[0]);
    let row_step = if rows >= 2 {
        sub(corners[cols], corners[0])
    } else {
        rotate((0.0, -step), theta)
    };

    debug!(
        projection = projection.id(),
        theta_deg = theta.to_degrees(),
        scale,
        cells = corners.len(),
        "Grid layout computed"
    );

    let rings = corners
        .iter()
        .map(|&p| -> Result<[GeoPoint; 5], GridError> {
            let planar = [
                p,
                add(p, row_step),
                add(add(p, row_step), column_step),
                add(p, column_step),
            ];
            let mut ring = [origin; 5];
            for (slot, xy) in ring.iter_mut().zip(planar) {
                *slot = projection.unproject(xy.0, xy.1)?;
            }
            ring[4] = ring[0];
            Ok(ring)
        })
        .collect::<Result<Vec<_>, GridError>>()?;

    Ok(GridLayout {
        theta,
        scale,
        column_step,
        row_step,
        rings,
    })
}

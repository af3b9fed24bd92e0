use geo::{line_string, Haversine, Length, LineString, Point};
use uom::si::f64::Length as UomLength;
use uom::si::length::{meter, mile};

/// great-circle distance between two lon/lat points
pub fn compute_haversine(src_point: Point<f64>, dst_point: Point<f64>) -> UomLength {
    let line: LineString<f64> = line_string![src_point.0, dst_point.0];
    UomLength::new::<meter>(Haversine.length(&line))
}

/// great-circle distance between two lon/lat points, in miles
pub fn haversine_miles(src_point: Point<f64>, dst_point: Point<f64>) -> f64 {
    compute_haversine(src_point, dst_point).get::<mile>()
}

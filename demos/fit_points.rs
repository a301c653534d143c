// Copyright 2024 the Bezapprox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fit a hand-drawn-looking stroke and print an SVG showing the samples,
//! the fitted curve and its control polygon.
//!
//! The optional first argument is the precision, in pixels (default 5).

use bezapprox::{fit_points, fit_single_segment, to_svg, ParamCurve, Point};

fn stroke_samples() -> Vec<Point> {
    // A wobbly spiral, sampled unevenly the way pointer events arrive.
    let mut pts = Vec::new();
    let mut a: f64 = 0.0;
    let mut step = 0.05;
    while a < 4.0 * core::f64::consts::PI {
        let r = 40.0 + 18.0 * a + 6.0 * (5.0 * a).sin();
        pts.push(Point::new(400.0 + r * a.cos(), 300.0 + r * a.sin()));
        a += step;
        step = if step > 0.15 { 0.04 } else { step * 1.3 };
    }
    pts
}

fn main() {
    let precision = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(5.0);

    let pts = stroke_samples();
    let segments = match fit_points(&pts, precision) {
        Ok(segments) => segments,
        Err(e) => {
            eprintln!("fit failed (status {}): {e}", e.code());
            std::process::exit(1);
        }
    };
    eprintln!(
        "{} samples -> {} segments at precision {precision}",
        pts.len(),
        segments.len()
    );
    if let Ok(single) = fit_single_segment(&pts, 0, pts.len() - 1) {
        eprintln!(
            "single segment: {} {} {} {}",
            single.p0, single.p1, single.p2, single.p3
        );
        eprintln!("  midpoint {:.2}", single.eval(0.5));
    }

    println!("<svg width='800' height='600' xmlns='http://www.w3.org/2000/svg'>");
    for p in &pts {
        println!(
            "  <circle cx='{:.2}' cy='{:.2}' r='1.5' fill='#c88'/>",
            p.x, p.y
        );
    }
    for c in &segments {
        println!(
            "  <path d='M{} {} L{} {} M{} {} L{} {}' stroke='#88c' fill='none'/>",
            c.p0.x, c.p0.y, c.p1.x, c.p1.y, c.p3.x, c.p3.y, c.p2.x, c.p2.y
        );
    }
    println!(
        "  <path d='{}' stroke='#000' fill='none' stroke-width='1.5'/>",
        to_svg(&segments)
    );
    println!("</svg>");
}

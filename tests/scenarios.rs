use approx::assert_abs_diff_eq;
use std::cell::Cell;
use std::f32::consts::FRAC_PI_2;
use std::rc::Rc;

use radarchart::chart::{
    ChartGeometry, ChartStyle, DataShape, Point, RingMode, RingShape, ScaleModel, Viewport,
};
use radarchart::config::Config;
use radarchart::renderer::svg::SvgRenderer;
use radarchart::ChartError;

fn manual_chart(axis_max: f32, axis_tick: f32, center: Point, pixel_radius: f32) -> ChartGeometry {
    let scale = ScaleModel::new(axis_max, Some(axis_tick), false).unwrap();
    let mut chart = ChartGeometry::new(ChartStyle::default(), scale);
    chart.set_viewport(Viewport::new(center, pixel_radius));
    chart
}

#[test]
fn rings_follow_the_tick_spacing() {
    let mut chart = manual_chart(20.0, 4.0, Point::new(100.0, 100.0), 100.0);
    chart
        .set_axis([("a", 5.0), ("b", 10.0), ("c", 15.0)])
        .unwrap();

    let radii: Vec<f32> = chart.rings().iter().map(|r| r.radius).collect();
    assert_eq!(radii.len(), 5);
    for (radius, expected) in radii.iter().zip([20.0, 40.0, 60.0, 80.0, 100.0]) {
        assert_abs_diff_eq!(*radius, expected, epsilon = 1e-3);
    }
    assert_eq!(chart.rings()[4].color, chart.end_color());
    assert_eq!(chart.rings()[0].color, chart.start_color());
}

#[test]
fn auto_size_tracks_the_largest_value() {
    let mut chart = ChartGeometry::default();
    chart.layout(300.0, 300.0, Default::default());
    assert!(chart.is_auto_size());

    chart
        .set_axis([("A", 5.0), ("B", 15.0), ("C", 10.0)])
        .unwrap();
    assert_eq!(chart.axis_max(), 15.0);

    chart.add_or_replace("D", 20.0).unwrap();
    assert_eq!(chart.axis_max(), 20.0);

    chart.remove("D");
    assert_eq!(chart.axis_max(), 15.0);

    chart.add_or_replace("B", 3.0).unwrap();
    assert_eq!(chart.axis_max(), 10.0);
}

#[test]
fn single_axis_collapses_data_to_the_center() {
    let center = Point::new(60.0, 60.0);
    let mut chart = manual_chart(20.0, 4.0, center, 50.0);
    chart.add_or_replace("only", 10.0).unwrap();

    let scene = chart.scene(&SvgRenderer::new(120.0, 120.0));
    let data = scene.data.expect("data shape");
    assert_eq!(data.shape, DataShape::Point(center));

    assert_eq!(scene.axes.len(), 1);
    let end = scene.axes[0].to;
    assert_abs_diff_eq!(end.distance(center), 50.0, epsilon = 1e-3);
    let angle = (end.y - center.y).atan2(end.x - center.x);
    assert_abs_diff_eq!(angle, -FRAC_PI_2, epsilon = 1e-4);
}

#[test]
fn non_positive_tick_is_rejected() {
    let mut chart = manual_chart(20.0, 4.0, Point::new(50.0, 50.0), 50.0);
    chart.take_redraw();

    for bad in [0.0, -2.0, f32::NAN] {
        assert!(matches!(
            chart.set_axis_tick(bad),
            Err(ChartError::InvalidAxisTick(_))
        ));
        assert_eq!(chart.axis_tick(), 4.0);
    }
    assert!(!chart.take_redraw());
}

#[test]
fn tiny_tick_is_bounded_by_the_pixel_budget() {
    let mut chart = manual_chart(20.0, 4.0, Point::new(100.0, 100.0), 100.0);
    chart.set_axis_tick(1e-12).unwrap();
    assert_eq!(chart.rings().len(), 100);
    assert_eq!(chart.rings()[99].radius, 100.0);
}

#[test]
fn circles_only_overrides_polygon_rings() {
    let mut chart = manual_chart(20.0, 4.0, Point::new(100.0, 100.0), 100.0);
    chart
        .set_axis([("a", 1.0), ("b", 2.0), ("c", 3.0), ("d", 4.0), ("e", 5.0)])
        .unwrap();
    assert_eq!(chart.ring_mode(), RingMode::Polygons);

    chart.set_circles_only(true);
    assert_eq!(chart.ring_mode(), RingMode::Circles);

    let scene = chart.scene(&SvgRenderer::new(200.0, 200.0));
    assert_eq!(scene.mode, RingMode::Circles);
    assert_eq!(scene.rings.len(), 5);
    assert!(scene
        .rings
        .iter()
        .all(|r| matches!(r, RingShape::Circle { .. })));
}

#[test]
fn reapplying_the_axis_map_is_a_no_op() {
    let mut chart = ChartGeometry::default();
    chart.layout(400.0, 400.0, Default::default());
    chart
        .set_axis([("speed", 12.0), ("power", 18.0), ("range", 9.0)])
        .unwrap();

    let axes = chart.axis();
    let rings = chart.rings().to_vec();
    let data = chart.data_vertices().to_vec();

    chart.set_axis(chart.axis()).unwrap();
    assert_eq!(chart.axis(), axes);
    assert_eq!(chart.rings(), rings.as_slice());
    assert_eq!(chart.data_vertices(), data.as_slice());
}

#[test]
fn invalid_batch_leaves_axes_untouched() {
    let mut chart = ChartGeometry::default();
    chart.set_axis([("a", 1.0), ("b", 2.0)]).unwrap();
    let before = chart.axis();

    let err = chart.set_axis([("c", 3.0), ("d", -1.0)]).unwrap_err();
    assert!(matches!(err, ChartError::InvalidAxisValue { ref name, .. } if name == "d"));
    assert_eq!(chart.axis(), before);
}

#[test]
fn axis_order_sets_the_angular_order() {
    let center = Point::new(100.0, 100.0);
    let mut chart = manual_chart(10.0, 2.0, center, 100.0);
    chart
        .set_axis([("north", 10.0), ("east", 10.0), ("south", 10.0), ("west", 10.0)])
        .unwrap();

    let v = chart.axis_vertices();
    assert_abs_diff_eq!(v[0].y, 0.0, epsilon = 1e-3);
    assert_abs_diff_eq!(v[1].x, 200.0, epsilon = 1e-3);
    assert_abs_diff_eq!(v[2].y, 200.0, epsilon = 1e-3);
    assert_abs_diff_eq!(v[3].x, 0.0, epsilon = 1e-3);
}

#[test]
fn each_accepted_mutation_signals_once() {
    let count = Rc::new(Cell::new(0));
    let mut chart = ChartGeometry::default();
    let seen = Rc::clone(&count);
    chart.on_redraw(move || seen.set(seen.get() + 1));

    chart.add_or_replace("a", 4.0).unwrap();
    chart.set_end_color(radarchart::Rgb::WHITE);
    chart.layout(100.0, 100.0, Default::default());
    assert_eq!(count.get(), 3);

    assert!(chart.remove("missing").is_none());
    assert!(chart.set_axis_max(-1.0).is_err());
    assert!(chart.add_or_replace("b", f32::INFINITY).is_err());
    assert_eq!(count.get(), 3);

    chart.clear_axis();
    assert_eq!(count.get(), 4);
    assert!(chart.take_redraw());
    assert!(!chart.take_redraw());
}

#[test]
fn default_config_renders_an_svg_document() {
    let config = Config::default();
    let chart = config.build_chart().unwrap();
    let mut svg = SvgRenderer::new(config.layout.width as f32, config.layout.height as f32);
    chart.draw(&mut svg);
    let doc = svg.finish();

    assert!(doc.starts_with("<svg"));
    assert!(doc.trim_end().ends_with("</svg>"));
    for name in config.axes.keys() {
        assert!(doc.contains(&format!(">{}</text>", name)), "missing label {name}");
    }
    // five axes: polygon rings plus the data polygon, one spoke per axis
    assert_eq!(
        doc.matches("<path").count(),
        chart.rings().len() + 1
    );
    assert_eq!(doc.matches("<line").count(), 5);
    assert_eq!(doc.matches("<circle").count(), 0);
}

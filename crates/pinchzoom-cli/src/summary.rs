use console::Style;
use pinchzoom_core::config::ZoomConfig;
use pinchzoom_core::geometry::NaturalSize;
use pinchzoom_core::loader::ImageDescriptor;
use pinchzoom_core::viewport::{ViewportController, ZoomPhase};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_image_summary(
    descriptor: &ImageDescriptor,
    natural: NaturalSize,
    controller: &ViewportController,
) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("PinchZoom Image"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(15)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Source"),
        s.path.apply_to(descriptor.uri())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Kind"),
        s.method.apply_to(if descriptor.is_remote() { "remote" } else { "local" })
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Natural"),
        s.value.apply_to(natural)
    );
    println!();

    print_zoom_policy(&s, controller.config());

    let Some(state) = controller.state() else {
        println!(
            "  {:<14}{}",
            s.header.apply_to("Viewport"),
            s.disabled.apply_to("not given")
        );
        println!();
        return;
    };

    println!("  {}", s.header.apply_to("Viewport"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(state.viewport_size)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Min scale"),
        s.value.apply_to(format!("{:.4}", state.min_scale))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Max scale"),
        s.value.apply_to(format!("{:.4}", state.max_scale))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Frame"),
        s.value.apply_to(state.content_frame)
    );
    println!();
}

fn print_zoom_policy(s: &Styles, zoom: &ZoomConfig) {
    println!("  {}", s.header.apply_to("Zoom Policy"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Max zoom"),
        s.value.apply_to(format!("{}x fit", zoom.max_zoom_factor))
    );
    if let Some(min) = zoom.min_scale {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Min (fixed)"),
            s.value.apply_to(min)
        );
    }
    if let Some(max) = zoom.max_scale {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Max (fixed)"),
            s.value.apply_to(max)
        );
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Double-tap"),
        s.method.apply_to(&zoom.double_tap)
    );
    println!();
}

/// Header for the gesture replay table.
pub fn print_step_header() {
    let s = Styles::new();
    println!(
        "{:>4}  {:<28} {:>8}  {:<8} {}",
        s.header.apply_to("#"),
        s.header.apply_to("Gesture"),
        s.header.apply_to("Scale"),
        s.header.apply_to("Phase"),
        s.header.apply_to("Frame")
    );
    println!("{}", "-".repeat(78));
}

pub fn print_step(index: usize, label: &str, controller: &ViewportController) {
    let s = Styles::new();
    let phase = match controller.phase() {
        ZoomPhase::Unconfigured => s.disabled.apply_to("unconf"),
        ZoomPhase::Fitted => s.method.apply_to("fitted"),
        ZoomPhase::Zoomed => s.value.apply_to("zoomed"),
    };
    let scale = controller
        .scale()
        .map(|v| format!("{v:.4}"))
        .unwrap_or_else(|| "-".into());
    let frame = controller
        .content_frame()
        .map(|f| f.to_string())
        .unwrap_or_else(|| "-".into());
    println!("{index:>4}  {label:<28} {scale:>8}  {phase:<8} {frame}");
}

use egui::{Color32, Visuals};

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

/// Card colors cycled by project name
const PROJECT_COLORS: [Color32; 8] = [
    Color32::from_rgb(100, 150, 200),
    Color32::from_rgb(86, 160, 120),
    Color32::from_rgb(200, 130, 80),
    Color32::from_rgb(150, 110, 190),
    Color32::from_rgb(190, 95, 110),
    Color32::from_rgb(70, 150, 160),
    Color32::from_rgb(170, 150, 70),
    Color32::from_rgb(120, 120, 135),
];

/// Stable color for a project name.
pub(crate) fn project_color(project: &str) -> Color32 {
    // FNV-1a; only needs to be stable across frames
    let hash = project
        .bytes()
        .fold(0x811c_9dc5_u32, |acc, b| (acc ^ b as u32).wrapping_mul(0x0100_0193));
    PROJECT_COLORS[hash as usize % PROJECT_COLORS.len()]
}

#[derive(Clone, Copy)]
pub(crate) struct SchedulerPalette {
    pub is_dark: bool,
    pub regular_bg: Color32,
    pub work_bg: Color32,
    pub today_bg: Color32,
    pub outside_month_bg: Color32,
    pub hour_line: Color32,
    pub slot_line: Color32,
    pub divider: Color32,
    pub text: Color32,
    pub muted_text: Color32,
    pub hover_overlay: Color32,
    pub drop_preview: Color32,
    pub selection: Color32,
    pub settle_ring: Color32,
}

impl SchedulerPalette {
    pub fn from_visuals(visuals: &Visuals) -> Self {
        let base = visuals.extreme_bg_color;
        let panel = visuals.panel_fill;
        let accent = visuals.selection.bg_fill;
        let border = visuals.widgets.noninteractive.bg_stroke.color;
        let text = visuals.text_color();
        Self {
            is_dark: visuals.dark_mode,
            regular_bg: blend(base, panel, 0.4),
            work_bg: base,
            today_bg: blend(base, accent, 0.12),
            outside_month_bg: panel,
            hour_line: border,
            slot_line: with_alpha(border, 90),
            divider: with_alpha(border, 220),
            text,
            muted_text: visuals.weak_text_color(),
            hover_overlay: with_alpha(accent, if visuals.dark_mode { 60 } else { 40 }),
            drop_preview: with_alpha(accent, if visuals.dark_mode { 110 } else { 80 }),
            selection: with_alpha(accent, 120),
            settle_ring: if visuals.dark_mode {
                Color32::from_rgb(250, 220, 120)
            } else {
                Color32::from_rgb(230, 160, 20)
            },
        }
    }
}

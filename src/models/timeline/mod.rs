// Timeline module
// Day window, work hours and block size for the time grid

use serde::{Deserialize, Serialize};

/// Minutes in a calendar day.
pub const MINUTES_PER_DAY: i32 = 1440;
/// Block sizes the default policy accepts (minutes per slot).
pub const ALLOWED_BLOCK_SIZES: [i32; 3] = [15, 30, 60];
pub const DEFAULT_BLOCK_SIZE: i32 = 15;
pub const DEFAULT_SLOT_HEIGHT: f32 = 24.0;
pub const DEFAULT_WORK_START: i32 = 8 * 60;
pub const DEFAULT_WORK_END: i32 = 18 * 60;

/// Caller-supplied timeline values, straight from settings.
///
/// Nothing here is trusted: every field passes through
/// [`TimelineConfig::resolve`] before the grid uses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    pub day_start_minutes: i32,
    pub day_end_minutes: i32,
    pub work_start_minutes: i32,
    pub work_end_minutes: i32,
    pub block_size_minutes: i32,
    pub slot_height: f32,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            day_start_minutes: 0,
            day_end_minutes: MINUTES_PER_DAY,
            work_start_minutes: DEFAULT_WORK_START,
            work_end_minutes: DEFAULT_WORK_END,
            block_size_minutes: DEFAULT_BLOCK_SIZE,
            slot_height: DEFAULT_SLOT_HEIGHT,
        }
    }
}

/// Result of running a day window through [`normalize_window`].
#[derive(Debug, Clone, PartialEq)]
pub struct WindowNormalization {
    pub start: i32,
    pub end: i32,
    pub block_size: i32,
    pub warnings: Vec<String>,
}

/// Snap a block size to the nearest allowed size. Ties go to the smaller one.
fn nearest_block_size(block_size: i32) -> i32 {
    let mut best = ALLOWED_BLOCK_SIZES[0];
    for candidate in ALLOWED_BLOCK_SIZES {
        if (candidate - block_size).abs() < (best - block_size).abs() {
            best = candidate;
        }
    }
    best
}

fn snap_down(minute: i32, block: i32) -> i32 {
    minute.div_euclid(block) * block
}

fn snap_up(minute: i32, block: i32) -> i32 {
    let down = snap_down(minute, block);
    if down == minute {
        minute
    } else {
        down + block
    }
}

/// Format minutes-of-day as `HH:MM` for warnings and labels.
pub fn format_minutes(minute: i32) -> String {
    format!("{:02}:{:02}", minute.div_euclid(60), minute.rem_euclid(60))
}

/// Validate a day window and block size.
///
/// Never fails: anything invalid is corrected to the nearest valid value and
/// a warning describing the change is recorded. The corrected triple is a
/// fixed point, so normalizing it again changes nothing.
pub fn normalize_window(start: i32, end: i32, block_size: i32) -> WindowNormalization {
    let mut warnings = Vec::new();

    let block = if ALLOWED_BLOCK_SIZES.contains(&block_size) {
        block_size
    } else {
        let snapped = nearest_block_size(block_size);
        warnings.push(format!(
            "Block size {} min is not supported; using {} min",
            block_size, snapped
        ));
        snapped
    };

    let mut window_start = start.clamp(0, MINUTES_PER_DAY);
    let mut window_end = end.clamp(0, MINUTES_PER_DAY);
    if window_start != start {
        warnings.push(format!(
            "Day start {} min is outside the day; clamped to {}",
            start,
            format_minutes(window_start)
        ));
    }
    if window_end != end {
        warnings.push(format!(
            "Day end {} min is outside the day; clamped to {}",
            end,
            format_minutes(window_end)
        ));
    }

    let snapped_start = snap_down(window_start, block);
    if snapped_start != window_start {
        warnings.push(format!(
            "Day start {} snapped to {}",
            format_minutes(window_start),
            format_minutes(snapped_start)
        ));
        window_start = snapped_start;
    }
    let snapped_end = snap_up(window_end, block).min(MINUTES_PER_DAY);
    if snapped_end != window_end {
        warnings.push(format!(
            "Day end {} snapped to {}",
            format_minutes(window_end),
            format_minutes(snapped_end)
        ));
        window_end = snapped_end;
    }

    if window_end - window_start < block {
        window_end = (window_start + block).min(MINUTES_PER_DAY);
        window_start = window_end - block;
        warnings.push(format!(
            "Day window shorter than one block; widened to {}-{}",
            format_minutes(window_start),
            format_minutes(window_end)
        ));
    }

    WindowNormalization {
        start: window_start,
        end: window_end,
        block_size: block,
        warnings,
    }
}

/// Clamp work hours into an already-normalized day window.
///
/// Returns `(work_start, work_end, warnings)`. Work hours are at least one
/// block apart and sit on block boundaries.
pub fn normalize_work_hours(
    work_start: i32,
    work_end: i32,
    day_start: i32,
    day_end: i32,
    block: i32,
) -> (i32, i32, Vec<String>) {
    let mut warnings = Vec::new();

    let mut start = snap_down(work_start.clamp(day_start, day_end), block);
    let mut end = snap_up(work_end.clamp(day_start, day_end), block).min(day_end);
    if start != work_start || end != work_end {
        warnings.push(format!(
            "Work hours {}-{} adjusted to {}-{}",
            format_minutes(work_start),
            format_minutes(work_end),
            format_minutes(start),
            format_minutes(end)
        ));
    }

    if end - start < block {
        end = (start + block).min(day_end);
        start = end - block;
        warnings.push(format!(
            "Work hours shorter than one block; widened to {}-{}",
            format_minutes(start),
            format_minutes(end)
        ));
    }

    (start, end, warnings)
}

/// Validated, immutable timeline for one render cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
///
/// Only `resolve` builds one, so every accessor below returns normalized
/// values and `block_size` is never zero.
pub struct TimelineConfig {
    day_start: i32,
    day_end: i32,
    work_start: i32,
    work_end: i32,
    block_size: i32,
    slot_height: f32,
}

impl TimelineConfig {
    /// The single gate for externally supplied timeline values.
    pub fn resolve(settings: &TimelineSettings) -> (Self, Vec<String>) {
        let window = normalize_window(
            settings.day_start_minutes,
            settings.day_end_minutes,
            settings.block_size_minutes,
        );
        let mut warnings = window.warnings;

        let (work_start, work_end, work_warnings) = normalize_work_hours(
            settings.work_start_minutes,
            settings.work_end_minutes,
            window.start,
            window.end,
            window.block_size,
        );
        warnings.extend(work_warnings);

        let slot_height = if settings.slot_height.is_finite() && settings.slot_height > 0.0 {
            settings.slot_height
        } else {
            warnings.push(format!(
                "Slot height {} is invalid; using {}",
                settings.slot_height, DEFAULT_SLOT_HEIGHT
            ));
            DEFAULT_SLOT_HEIGHT
        };

        for warning in &warnings {
            log::warn!("Timeline: {}", warning);
        }

        (
            Self {
                day_start: window.start,
                day_end: window.end,
                work_start,
                work_end,
                block_size: window.block_size,
                slot_height,
            },
            warnings,
        )
    }

    pub fn day_start(&self) -> i32 {
        self.day_start
    }

    pub fn day_end(&self) -> i32 {
        self.day_end
    }

    pub fn work_start(&self) -> i32 {
        self.work_start
    }

    pub fn work_end(&self) -> i32 {
        self.work_end
    }

    /// Minutes per slot, one of 15, 30 or 60.
    pub fn block_size(&self) -> i32 {
        self.block_size
    }

    pub fn slot_height(&self) -> f32 {
        self.slot_height
    }

    pub fn slot_count(&self) -> i32 {
        (self.day_end - self.day_start) / self.block_size
    }

    pub fn window_minutes(&self) -> i32 {
        self.day_end - self.day_start
    }

    /// Total pixel height of a day column.
    pub fn column_height(&self) -> f32 {
        self.slot_count() as f32 * self.slot_height
    }

    /// True if the slot falls inside the highlighted work hours.
    pub fn is_work_slot(&self, slot: i32) -> bool {
        let minute = self.day_start + slot * self.block_size;
        minute >= self.work_start && minute < self.work_end
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self::resolve(&TimelineSettings::default()).0
    }
}

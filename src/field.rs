/// Playfield geometry: the toroidal wrap policy and the boxes used for
/// overlap tests.
///
/// Nothing here knows about entities; callers pass the field dimensions in
/// explicitly instead of reaching for a global screen.

/// Logical width of the playfield.
pub const FIELD_WIDTH: f32 = 640.0;
/// Logical height of the playfield.
pub const FIELD_HEIGHT: f32 = 480.0;

// ── Field ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Field {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Field { width, height }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Teleport a point that has left `[0, W] × [0, H]` to the opposite edge.
    ///
    /// This is a hard jump, not a modulo: a point at `-3` lands exactly on
    /// `W`, and a point at `W + 3` lands exactly on `0`.
    pub fn wrap(&self, x: f32, y: f32) -> (f32, f32) {
        let x = if x < 0.0 {
            self.width
        } else if x > self.width {
            0.0
        } else {
            x
        };
        let y = if y < 0.0 {
            self.height
        } else if y > self.height {
            0.0
        } else {
            y
        };
        (x, y)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

// ── Cardinal headings ─────────────────────────────────────────────────────────

/// Fold any multiple of 90° into `{0, 90, 180, 270}` (450 → 90, -90 → 270).
pub fn normalize_angle(angle: i32) -> i32 {
    angle.rem_euclid(360)
}

/// Unit step for a cardinal heading in screen space: 90° is up (y shrinks),
/// 270° is down, 180° is left and 0° is right.
pub fn heading(angle: i32) -> (f32, f32) {
    match normalize_angle(angle) {
        90 => (0.0, -1.0),
        180 => (-1.0, 0.0),
        270 => (0.0, 1.0),
        _ => (1.0, 0.0),
    }
}

// ── Bounds ────────────────────────────────────────────────────────────────────

/// Axis-aligned box stored by its centre and full extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub cx: f32,
    pub cy: f32,
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    pub fn new(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Bounds { cx, cy, w, h }
    }

    pub fn left(&self) -> f32 {
        self.cx - self.w / 2.0
    }

    pub fn right(&self) -> f32 {
        self.cx + self.w / 2.0
    }

    pub fn top(&self) -> f32 {
        self.cy - self.h / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.cy + self.h / 2.0
    }

    /// Strict overlap: boxes that only share an edge do not touch.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

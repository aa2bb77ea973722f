//! Shared numeric constants for the canvas crate.

// ── Geometry ────────────────────────────────────────────────────

/// Smallest width or height an element may have, in canvas-local units.
pub const MIN_SIZE: f64 = 32.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for resize handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Drawn edge length of a resize handle, in screen pixels.
pub const HANDLE_SIZE_PX: f64 = 8.0;

// ── Default project ─────────────────────────────────────────────

/// Identifier of the element every new project starts with.
pub const DEFAULT_ELEMENT_ID: &str = "button-001";

/// Geometry of the default element: `(left, top, width, height)`.
pub const DEFAULT_ELEMENT_RECT: (f64, f64, f64, f64) = (175.0, 137.0, 177.297, 280.0);

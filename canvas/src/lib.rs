//! Visual layout editor engine: drag and resize elements on the editable
//! surface and turn each finished gesture into one layout commit.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! element registry, the gesture state machine and the geometry math, and it
//! projects the registry into a paintable [`render::Scene`]. The host
//! JavaScript layer wires DOM events to the engine, paints scenes, and
//! carries out the returned [`engine::Action`]s: commits go through a
//! [`commit::PatchTransport`], snapshots through a [`persist::SnapshotStore`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Browser-bound engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Element registry and snapshots |
//! | [`geometry`] | Drag/resize math with minimum-size clamping |
//! | [`camera`] | Viewport ↔ canvas-local coordinate conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against elements and resize handles |
//! | [`render`] | Scene projection of the registry |
//! | [`commit`] | Client side of the patch transport |
//! | [`persist`] | Per-project registry snapshots |
//! | [`consts`] | Shared numeric constants |

pub mod camera;
pub mod commit;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod persist;
pub mod render;

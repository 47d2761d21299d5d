//! Interactive card-stack engine: a fanned stack of flippable, swipeable cards where only
//! the top card takes input, driven by pointer events and a host frame clock.

pub mod animation;
pub mod card;
pub mod config;
pub mod controller;
pub mod dismissal;
pub mod error;
pub mod gesture;
pub mod round;
pub mod stack;
pub mod theme;

pub use card::{Card, CardTransform};
pub use config::{load_config, EngineConfig};
pub use controller::{CardController, CardEvent, CardNotice, CardState, CardVisual};
pub use dismissal::{DismissAxis, DismissOutcome, DismissalPolicy, ExitVector};
pub use error::EngineError;
pub use gesture::{GesturePhase, GestureSample, GestureSession};
pub use round::{how_to_play_deck, RoundSetup};
pub use stack::{geometry_for, StackGeometry, StackManager, StackSpec};
pub use theme::{DefaultPalette, ThemeProvider};

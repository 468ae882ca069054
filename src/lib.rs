//! STARFM: predicts a fine-resolution reflectance image at t1 from a fine image at t0 and coarse
//! images at t0 and t1 (Gao et al., 2006).
//!
//! ```no_run
//! use starfm::{FusionParams, Raster, Starfm};
//!
//! # fn main() -> starfm::Result<()> {
//! let fine_t0 = Raster::filled(100, 100, 0.2);
//! let coarse_t0 = Raster::filled(100, 100, 0.21);
//! let coarse_t1 = Raster::filled(100, 100, 0.25);
//!
//! let params = FusionParams::default().with_window_size(15);
//! let fine_t1 = Starfm::new(params).run(&fine_t0, &coarse_t0, &coarse_t1)?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod error;
pub mod fusion;
pub mod io;
pub mod params;
pub mod raster;

pub use backend::{Backend, Parallel, RowStats, Sequential};
pub use error::{FusionError, RasterIoError, Result};
pub use fusion::{starfm, FusionReport, Starfm};
pub use params::FusionParams;
pub use raster::{Raster, Window};

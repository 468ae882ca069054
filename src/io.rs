//! Single-band TIFF rasters.
//!
//! Only pixel values travel through here; georeferencing tags are neither read nor written.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::encoder::{colortype, TiffEncoder};

use crate::error::RasterIoError;
use crate::raster::Raster;

pub fn read_raster<P: AsRef<Path>>(path: P) -> Result<Raster, RasterIoError> {
    let path = path.as_ref();
    let tiff_err = |source| RasterIoError::Tiff {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|source| RasterIoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut decoder = Decoder::new(BufReader::new(file))
        .map_err(tiff_err)?
        .with_limits(Limits::unlimited());

    match decoder.colortype().map_err(tiff_err)? {
        tiff::ColorType::Gray(_) => {}
        other => {
            return Err(RasterIoError::UnsupportedColorType {
                path: path.to_path_buf(),
                color_type: format!("{other:?}"),
            })
        }
    }

    let (width, height) = decoder.dimensions().map_err(tiff_err)?;
    let data: Vec<f64> = match decoder.read_image().map_err(tiff_err)? {
        DecodingResult::U8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::F32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::F64(v) => v,
        other => {
            return Err(RasterIoError::UnsupportedSampleFormat {
                path: path.to_path_buf(),
                format: sample_format_name(&other).to_string(),
            })
        }
    };

    log::debug!("read {}x{} raster from {}", height, width, path.display());

    Ok(Raster::new(height as usize, width as usize, data)?)
}

fn sample_format_name(result: &DecodingResult) -> &'static str {
    match result {
        DecodingResult::U64(_) => "u64",
        DecodingResult::I64(_) => "i64",
        _ => "unknown",
    }
}

/// Writes `raster` as 32-bit float samples.
pub fn write_raster<P: AsRef<Path>>(path: P, raster: &Raster) -> Result<(), RasterIoError> {
    let path = path.as_ref();
    let too_large = || RasterIoError::TooLarge {
        rows: raster.rows(),
        cols: raster.cols(),
    };
    let width = u32::try_from(raster.cols()).map_err(|_| too_large())?;
    let height = u32::try_from(raster.rows()).map_err(|_| too_large())?;

    let file = File::create(path).map_err(|source| RasterIoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let tiff_err = |source| RasterIoError::Tiff {
        path: path.to_path_buf(),
        source,
    };

    let samples: Vec<f32> = raster.data().iter().map(|&v| v as f32).collect();
    TiffEncoder::new(BufWriter::new(file))
        .map_err(tiff_err)?
        .write_image::<colortype::Gray32Float>(width, height, &samples)
        .map_err(tiff_err)?;

    log::debug!("wrote {}x{} raster to {}", height, width, path.display());

    Ok(())
}

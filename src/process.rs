use std::{
    any::Any,
    io::{self, Write},
    panic::{self, AssertUnwindSafe},
    path::{Path, PathBuf},
    sync::mpsc::Sender,
    time::Instant,
};

use image::{
    codecs::ico::{IcoEncoder, IcoFrame},
    imageops::FilterType,
    ExtendedColorType, ImageError, RgbaImage,
};

use crate::{
    error::{ConfigurationError, ConversionError},
    structs::{sizes::ICON_SIZES, update::Update},
    util::files::icon_path,
};

/// An icon written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct IconFile {
    pub path: PathBuf,
    /// Edge lengths in the order they were written, largest first.
    pub sizes: Vec<u32>,
}

/// Files and destination for one batch, checked before anything is converted.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    files: Vec<PathBuf>,
    destination: PathBuf,
}

impl BatchRequest {
    pub fn new(
        files: Vec<PathBuf>,
        destination: Option<PathBuf>,
    ) -> Result<Self, ConfigurationError> {
        let destination = destination.ok_or(ConfigurationError::NoDestination)?;

        if files.is_empty() {
            return Err(ConfigurationError::NoFiles);
        }

        if !destination.is_dir() {
            return Err(ConfigurationError::NotADirectory(destination));
        }

        Ok(Self { files, destination })
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

/// Worker entry point: converts the whole batch and reports through `sender`.
pub fn convert_images(sender: Sender<Update>, request: BatchRequest) {
    let start_time = Instant::now();

    log::info!(
        "Converting {} file(s) into '{}'",
        request.files().len(),
        request.destination().display()
    );

    // The shell may go away mid-batch; keep converting regardless.
    let results = convert_all_with(request.files(), request.destination(), |update| {
        let _ = sender.send(update);
    });

    let failed = results.iter().filter(|result| result.is_err()).count();
    let elapsed = start_time.elapsed();
    log::info!(
        "Finished {} file(s), {} failed, in {:.2} seconds",
        results.len(),
        failed,
        elapsed.as_secs_f32()
    );

    let _ = sender.send(Update::QueueCompleted(elapsed));
}

/// Converts every source into `destination`, one result per source in input order.
pub fn convert_all(
    sources: &[PathBuf],
    destination: &Path,
) -> Vec<Result<IconFile, ConversionError>> {
    convert_all_with(sources, destination, |_| {})
}

pub fn convert_all_with<F>(
    sources: &[PathBuf],
    destination: &Path,
    mut on_update: F,
) -> Vec<Result<IconFile, ConversionError>>
where
    F: FnMut(Update),
{
    run_batch(sources, destination, convert, on_update)
}

fn run_batch<C, F>(
    sources: &[PathBuf],
    destination: &Path,
    mut convert_one: C,
    mut on_update: F,
) -> Vec<Result<IconFile, ConversionError>>
where
    C: FnMut(&Path, &Path) -> Result<IconFile, ConversionError>,
    F: FnMut(Update),
{
    sources
        .iter()
        .map(|source| {
            let start_time = Instant::now();
            on_update(Update::StartProcessing(source.clone()));

            // A panicking decoder only fails this file.
            let result =
                panic::catch_unwind(AssertUnwindSafe(|| convert_one(source, destination)))
                    .unwrap_or_else(|payload| {
                        let err = panicked(source, payload.as_ref());
                        log::error!("Failed to convert {} to ICO: {}", source.display(), err);
                        Err(err)
                    });

            let outcome = match &result {
                Ok(icon) => Ok(icon.path.clone()),
                Err(e) => Err(e.to_string()),
            };
            on_update(Update::FinishedProcessing(
                source.clone(),
                outcome,
                start_time.elapsed(),
            ));

            result
        })
        .collect()
}

fn panicked(source: &Path, payload: &(dyn Any + Send)) -> ConversionError {
    let message = payload
        .downcast_ref::<&str>()
        .map(|message| message.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());

    ConversionError::Decode {
        path: source.to_path_buf(),
        source: ImageError::IoError(io::Error::new(
            io::ErrorKind::Other,
            format!("conversion panicked: {}", message),
        )),
    }
}

/// Writes `<destination>/<source stem>.ico` holding every size in [`ICON_SIZES`].
pub fn convert(source: &Path, destination: &Path) -> Result<IconFile, ConversionError> {
    let result = convert_inner(source, destination);

    match &result {
        Ok(icon) => log::info!(
            "Saved ICO file to: {} ({} sizes)",
            icon.path.display(),
            icon.sizes.len()
        ),
        Err(e) => log::warn!("Failed to convert {} to ICO: {}", e.path().display(), e),
    }

    result
}

fn convert_inner(source: &Path, destination: &Path) -> Result<IconFile, ConversionError> {
    let output_path = icon_path(source, destination).ok_or_else(|| ConversionError::Decode {
        path: source.to_path_buf(),
        source: ImageError::IoError(io::Error::new(
            io::ErrorKind::InvalidInput,
            "source path has no file name",
        )),
    })?;

    let img = get_image(source)?;

    let (data, sizes) = encode_icon(&img).map_err(|e| ConversionError::Encode {
        path: source.to_path_buf(),
        source: e,
    })?;

    save_icon(&data, &output_path, destination).map_err(|e| ConversionError::Encode {
        path: source.to_path_buf(),
        source: ImageError::IoError(e),
    })?;

    Ok(IconFile {
        path: output_path,
        sizes,
    })
}

/// Writes into a temporary file in `destination`, then renames it over `output_path`.
fn save_icon(data: &[u8], output_path: &Path, destination: &Path) -> io::Result<()> {
    let mut file = tempfile::NamedTempFile::new_in(destination)?;
    file.write_all(data)?;
    file.as_file().sync_all()?;
    file.persist(output_path).map_err(|e| e.error)?;
    Ok(())
}

/// Decodes the source and forces it to RGBA; sources without alpha become fully opaque.
fn get_image(image_path: &Path) -> Result<RgbaImage, ConversionError> {
    image::open(image_path)
        .map(|img| img.to_rgba8())
        .map_err(|e| ConversionError::Decode {
            path: image_path.to_path_buf(),
            source: e,
        })
}

fn resize_image(img: &RgbaImage, size: u32) -> RgbaImage {
    image::imageops::resize(img, size, size, FilterType::Lanczos3)
}

/// Encoded icon and the edge length of every frame, in write order.
fn encode_icon(img: &RgbaImage) -> Result<(Vec<u8>, Vec<u32>), ImageError> {
    let resized: Vec<RgbaImage> = ICON_SIZES
        .iter()
        .map(|&size| {
            log::debug!("Resampling to {}x{}", size, size);
            resize_image(img, size)
        })
        .collect();

    let frames = resized
        .iter()
        .map(|frame| {
            IcoFrame::as_png(
                frame.as_raw(),
                frame.width(),
                frame.height(),
                ExtendedColorType::Rgba8,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut buf = Vec::new();
    IcoEncoder::new(&mut buf).encode_images(&frames)?;

    let sizes = resized.iter().map(|frame| frame.width()).collect();
    Ok((buf, sizes))
}

use std::path::{Path, PathBuf};

pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Keeps the paths with a supported image extension, in their original order.
pub fn filter_supported<I>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    paths
        .into_iter()
        .filter(|path| {
            let supported = is_supported(path);
            if !supported {
                log::debug!("Ignoring unsupported file '{}'", path.display());
            }
            supported
        })
        .collect()
}

/// `<destination>/<source stem>.ico`, or `None` if the source has no file stem.
pub fn icon_path(source: &Path, destination: &Path) -> Option<PathBuf> {
    let stem = source.file_stem()?;
    let mut file_name = stem.to_os_string();
    file_name.push(".ico");
    Some(destination.join(file_name))
}

/// Folder of the last file in the list.
pub fn source_folder(files: &[PathBuf]) -> Option<PathBuf> {
    files
        .last()
        .and_then(|file| file.parent())
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

pub fn home_dir() -> Option<PathBuf> {
    directories::UserDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_match_case_insensitively() {
        assert!(is_supported(Path::new("photo.png")));
        assert!(is_supported(Path::new("photo.JPG")));
        assert!(is_supported(Path::new("/some/dir/photo.Jpeg")));
        assert!(is_supported(Path::new("scan.bmp")));
        assert!(is_supported(Path::new("anim.GIF")));

        assert!(!is_supported(Path::new("notes.txt")));
        assert!(!is_supported(Path::new("image.webp")));
        assert!(!is_supported(Path::new("png")));
        assert!(!is_supported(Path::new("archive.png.zip")));
    }

    #[test]
    fn filter_keeps_order() {
        let files = vec![
            PathBuf::from("b.png"),
            PathBuf::from("readme.md"),
            PathBuf::from("a.jpg"),
            PathBuf::from("c.GIF"),
        ];

        assert_eq!(
            filter_supported(files),
            vec![
                PathBuf::from("b.png"),
                PathBuf::from("a.jpg"),
                PathBuf::from("c.GIF")
            ]
        );
    }

    #[test]
    fn icon_path_replaces_extension() {
        assert_eq!(
            icon_path(Path::new("/pictures/photo.png"), Path::new("/tmp/out")),
            Some(PathBuf::from("/tmp/out/photo.ico"))
        );
        assert_eq!(
            icon_path(Path::new("my.logo.jpeg"), Path::new("out")),
            Some(PathBuf::from("out/my.logo.ico"))
        );
        assert_eq!(icon_path(Path::new("/"), Path::new("out")), None);
    }

    #[test]
    fn source_folder_uses_last_file() {
        let files = vec![
            PathBuf::from("/first/a.png"),
            PathBuf::from("/second/b.png"),
        ];
        assert_eq!(source_folder(&files), Some(PathBuf::from("/second")));
        assert_eq!(source_folder(&[PathBuf::from("bare.png")]), None);
        assert_eq!(source_folder(&[]), None);
    }
}

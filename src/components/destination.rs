use std::path::{Path, PathBuf};

use egui::Ui;

use crate::util::files::home_dir;

/// Destination row with a folder picker. Returns true when a new folder was chosen.
pub fn destination_input(
    ui: &mut Ui,
    destination: &mut Option<PathBuf>,
    source_folder: Option<&Path>,
) -> bool {
    let mut changed = false;

    ui.horizontal(|ui| {
        if ui.button("Select destination folder").clicked() {
            let start = source_folder.map(Path::to_path_buf).or_else(home_dir);

            let mut dialog = rfd::FileDialog::new().set_title("Select destination folder");
            if let Some(start) = start {
                dialog = dialog.set_directory(start);
            }

            if let Some(folder) = dialog.pick_folder() {
                log::info!("Destination set to '{}'", folder.display());
                *destination = Some(folder);
                changed = true;
            }
        }

        match destination {
            Some(folder) => ui.label(folder.display().to_string()),
            None => ui.weak("No destination selected"),
        };
    });

    changed
}

use std::path::PathBuf;
use std::time::Duration;
use std::{
    sync::mpsc::{channel, Receiver, TryRecvError},
    thread,
};

use eframe::egui;

use crate::{
    components::destination::destination_input,
    process::{convert_images, BatchRequest},
    structs::{sizes, update::Update},
    types::Progress,
    util::files::{filter_supported, source_folder},
};

const LOG_LENGTH: usize = 14;

#[derive(PartialEq, Clone, Copy)]
enum Page {
    Home,
    About,
}

pub struct App {
    page: Page,

    // Communication
    receiver: Option<Receiver<Update>>,

    // Messages
    status: String,
    messages: Vec<String>,

    files: Vec<PathBuf>,
    source_folder: Option<PathBuf>,
    destination: Option<PathBuf>,
    progress: Progress,
}

impl Default for App {
    fn default() -> Self {
        Self {
            page: Page::Home,

            // Communication
            receiver: None,

            status: "Drag and drop images here to convert to .ico format".to_string(),
            messages: Vec::new(),

            files: Vec::new(),
            source_folder: None,
            destination: None,
            progress: Progress::default(),
        }
    }
}

impl App {
    fn is_processing(&self) -> bool {
        self.receiver.is_some()
    }

    fn handle_drop(&mut self, paths: Vec<PathBuf>) {
        if self.is_processing() {
            log::info!("Ignoring {} dropped file(s) during conversion", paths.len());
            self.status = "Conversion in progress; drop ignored.".to_string();
            return;
        }

        self.accept_dropped(paths);
    }

    /// Replaces the pending files with the supported ones out of `paths`.
    fn accept_dropped(&mut self, paths: Vec<PathBuf>) {
        self.files = filter_supported(paths);

        if let Some(folder) = source_folder(&self.files) {
            self.destination = Some(folder.clone());
            self.source_folder = Some(folder);
        }

        self.progress = Progress::new(self.files.len() as u32);
        self.status = format!("{} image(s) ready for conversion.", self.files.len());
    }

    fn start_processing(&mut self) {
        let request = match BatchRequest::new(self.files.clone(), self.destination.clone()) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("Not starting conversion: {}", e);
                self.status = e.to_string();
                return;
            }
        };

        let (sender, receiver) = channel::<Update>();
        self.receiver = Some(receiver);

        self.messages.clear();
        self.progress = Progress::new(request.files().len() as u32);
        self.status = format!("Converting {} image(s)...", request.files().len());

        thread::spawn(move || {
            convert_images(sender, request);
        });
    }

    fn handle_completion(&mut self, duration: Duration) {
        self.receiver = None;
        self.files.clear();
        self.status = format!(
            "Conversion completed! {} converted, {} failed.",
            self.progress.converted, self.progress.failed
        );
        self.push_message(format!("Completed in {:#?}", duration));
    }

    /// The worker went away without reporting completion.
    fn handle_disconnect(&mut self) {
        log::error!("Conversion worker stopped before finishing the batch");
        self.receiver = None;
        self.status = format!(
            "Conversion stopped unexpectedly. {} converted, {} failed.",
            self.progress.converted, self.progress.failed
        );
        self.push_message("Conversion stopped unexpectedly".to_string());
    }

    fn handle_messages(&mut self) {
        loop {
            let received = match &self.receiver {
                Some(receiver) => receiver.try_recv(),
                None => return,
            };

            match received {
                Ok(update) => self.handle_update(update),
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    self.handle_disconnect();
                    return;
                }
            }
        }
    }

    fn handle_update(&mut self, update: Update) {
        match update {
            Update::StartProcessing(path) => {
                self.push_message(format!("Processing '{}'", display_name(&path)));
            }
            Update::FinishedProcessing(path, outcome, duration) => {
                let message = match outcome {
                    Ok(icon) => {
                        self.progress.increment_converted();
                        format!("Saved '{}'", icon.display())
                    }
                    Err(e) => {
                        self.progress.increment_failed();
                        format!("Failed to convert '{}': {}", display_name(&path), e)
                    }
                };
                self.push_message(format!("{} ({:#?})", message, duration));
            }
            Update::QueueCompleted(duration) => self.handle_completion(duration),
        }
    }

    fn push_message(&mut self, message: String) {
        self.messages.push(message);

        if self.messages.len() > LOG_LENGTH {
            self.messages.remove(0);
        }
    }

    // Pages
    fn home_page(&mut self, ui: &mut egui::Ui) {
        ui.heading("Destination");
        destination_input(ui, &mut self.destination, self.source_folder.as_deref());

        ui.add_space(8.0);

        ui.heading("Files");
        if self.files.is_empty() {
            ui.weak("Nothing to convert yet");
        } else {
            for file in &self.files {
                ui.label(display_name(file));
            }
        }

        ui.add_space(8.0);

        ui.heading("Logs");
        ui.label(self.messages.join("\n"));
    }

    fn about_page(&mut self, ui: &mut egui::Ui) {
        let sizes: Vec<String> = sizes::ascending().map(|size| size.to_string()).collect();

        ui.heading("About");
        ui.label("Converts PNG, JPEG, BMP and GIF images into Windows .ico files.");
        ui.label(format!(
            "Every icon holds {} px square images, resampled with a Lanczos filter.",
            sizes.join(", ")
        ));
    }
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // State
        self.handle_messages();

        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        if !dropped.is_empty() {
            self.handle_drop(dropped);
        }

        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());

        if self.is_processing() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // Render
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(4.0);

            // Nav
            ui.horizontal(|ui| {
                for page in &[Page::Home, Page::About] {
                    let label = match page {
                        Page::Home => "Home",
                        Page::About => "About",
                    };

                    if ui.selectable_label(self.page == *page, label).clicked() {
                        self.page = *page;
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Max), |ui| {
                    ui.add_space(10.0);
                    let can_convert = !self.files.is_empty() && !self.is_processing();
                    if ui
                        .add_enabled(can_convert, egui::Button::new("Convert to ICO"))
                        .clicked()
                    {
                        self.start_processing();
                    }

                    if self.progress.processed() > 0 {
                        ui.label(format!("{:.0}%", self.progress.fraction() * 100.0));
                    }
                });
            });

            ui.add_space(8.0);

            ui.add(egui::ProgressBar::new(self.progress.fraction()).desired_height(8.0));

            ui.add_space(8.0);

            if hovering {
                ui.strong("Drop to add images");
            } else {
                ui.label(self.status.as_str());
            }

            ui.add_space(8.0);

            // Content
            match self.page {
                Page::Home => self.home_page(ui),
                Page::About => self.about_page(ui),
            }
        });
    }
}

//! `molesp <molecule.json> [options.toml]`
//!
//! Loads an ESP molecule, prepares its surface colors and opens a window
//! with the interactive camera. The bundled renderer only tracks the
//! camera uniform and logs frames; GPU drawing is up to embedders.

use std::{path::PathBuf, process::ExitCode};

use molesp::{
    camera::{Camera, CameraUniform},
    color::Color,
    options::{DisplayOptions, Options},
    render_loop::Renderer,
    CameraControls, EspMolecule, EspView, MolEspError, Viewer,
};

/// Keeps the camera uniform current and logs each frame.
struct FrameLogger {
    uniform: CameraUniform,
    clear_color: Color,
    size: (u32, u32),
    frames: u64,
}

impl Renderer for FrameLogger {
    fn configure(&mut self, display: &DisplayOptions) {
        self.clear_color = display.clear_color();
        log::debug!("clear color #{:06x}", self.clear_color.to_hex());
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn update(&mut self, camera: &Camera) {
        self.uniform.update_view_proj(camera);
    }

    fn draw(&mut self, _camera: &Camera) {
        self.frames += 1;
        log::trace!(
            "frame {} ({}x{}) camera at {:?}",
            self.frames,
            self.size.0,
            self.size.1,
            self.uniform.position
        );
    }
}

fn run(molecule_path: PathBuf, options_path: Option<PathBuf>) -> Result<(), MolEspError> {
    let options = match options_path {
        Some(path) => Options::load(&path)?,
        None => Options::default(),
    };
    let molecule = EspMolecule::load(&molecule_path)?;

    let spheres = molecule.atom_spheres();
    log::debug!("{} atom spheres", spheres.len());

    let mut controls = CameraControls::from_options(&options.camera);
    controls.frame_points(&molecule.atom_positions());

    let mut view = EspView::from_options(&options)?;
    let _ = view.set_molecule(Some(molecule));
    let (min_label, max_label) = view.range_labels();
    log::info!(
        "showing {:?} on {} vertices, range [{min_label}, {max_label}]",
        view.selected_series().unwrap_or("<none>"),
        view.surface_colors().len() / 3
    );

    let title = molecule_path
        .file_name()
        .map_or_else(|| "molesp".to_owned(), |n| n.to_string_lossy().into_owned());

    Viewer::builder()
        .with_title(title)
        .with_options(options)
        .with_controls(controls)
        .build()
        .run(|_window| FrameLogger {
            uniform: CameraUniform::new(),
            clear_color: Color::WHITE,
            size: (1, 1),
            frames: 0,
        })
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let Some(molecule_path) = args.next() else {
        log::error!("usage: molesp <molecule.json> [options.toml]");
        return ExitCode::FAILURE;
    };
    let options_path = args.next();

    match run(molecule_path, options_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

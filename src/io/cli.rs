//! Command-line interface for batch conversion of images into brick mosaics

use crate::algorithm::availability::AvailabilityMap;
use crate::algorithm::catalog::{BrickCatalog, BrickKind};
use crate::algorithm::pipeline::{Mosaic, MosaicBuilder, MosaicConfig};
use crate::analysis::purchase::{ElementCatalog, resolve_purchase_list};
use crate::color::{ColorMatcher, Palette};
use crate::io::configuration::{
    DEFAULT_BRICKS_PER_STEP, DEFAULT_PREVIEW_SCALE, DEFAULT_REGION_GRID_SIZE,
    INSTRUCTIONS_HTML_SUFFIX, INSTRUCTIONS_JSON_SUFFIX, MANUAL_LOOKUP_SUFFIX, PARTS_CSV_SUFFIX,
    PARTS_JSON_SUFFIX, PREVIEW_SUFFIX, PURCHASE_CSV_SUFFIX, STEP_IMAGES_SUFFIX,
    SUPPORTED_EXTENSIONS,
};
use crate::io::error::{Result, WithPath, invalid_parameter};
use crate::io::export::{
    instructions_to_html, instructions_to_json, manual_lookup_to_json, parts_to_csv,
    parts_to_json, purchase_to_csv, write_text,
};
use crate::io::image::rasterize_path;
use crate::io::inventory::{Inventory, SnapshotOptions};
use crate::io::progress::ProgressManager;
use crate::io::render::{render_mosaic, render_step, save_png};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

fn parse_kind(text: &str) -> std::result::Result<BrickKind, String> {
    BrickKind::parse(text).ok_or_else(|| format!("expected 'plate' or 'brick', got '{text}'"))
}

#[derive(Parser)]
#[command(name = "brickmosaic")]
#[command(
    author,
    version,
    about = "Convert images into brick mosaics with parts lists and build instructions"
)]
/// Command-line arguments for the mosaic tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input image or directory of images to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Mosaic width in studs (height follows the aspect ratio if omitted)
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Mosaic height in studs (width follows the aspect ratio if omitted)
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Regions per side of the instruction layout
    #[arg(long, default_value_t = DEFAULT_REGION_GRID_SIZE)]
    pub regions: usize,

    /// Maximum bricks introduced per instruction step
    #[arg(long, default_value_t = DEFAULT_BRICKS_PER_STEP)]
    pub step_size: usize,

    /// Allow rotated placement of non-square parts
    #[arg(short = 'r', long)]
    pub rotate: bool,

    /// Store inventory JSON providing parts, colors and prices
    #[arg(short, long, value_name = "FILE")]
    pub inventory: Option<PathBuf>,

    /// Part family to build with
    #[arg(short, long, default_value = "plate", value_parser = parse_kind)]
    pub kind: BrickKind,

    /// Restrict the inventory palette to colors sold as both 1x1 brick and plate
    #[arg(short, long)]
    pub universal: bool,

    /// Fill colors missing from larger inventory parts with combinations of
    /// smaller parts, and allow placing them
    #[arg(long)]
    pub substitutes: bool,

    /// Pixels per stud in rendered images
    #[arg(long, default_value_t = DEFAULT_PREVIEW_SCALE)]
    pub scale: u32,

    /// Render an image for every instruction step
    #[arg(short, long)]
    pub steps: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Instruction parameters carried into the pipeline
    pub const fn mosaic_config(&self) -> MosaicConfig {
        MosaicConfig {
            region_grid_size: self.regions,
            bricks_per_step: self.step_size,
        }
    }
}

/// Parts, colors and constraints shared by every file of a run
pub struct BuildContext {
    /// Catalog, rotated variants included when requested
    pub catalog: BrickCatalog,
    /// Matcher over the active palette
    pub matcher: ColorMatcher,
    /// Unavailable combinations, if an inventory was given
    pub availability: Option<AvailabilityMap>,
    /// Element listings, if an inventory was given
    pub elements: Option<ElementCatalog>,
}

impl BuildContext {
    /// Build from the inventory named on the command line, or the built-in
    /// catalog and palette otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if the inventory cannot be loaded or yields no usable
    /// catalog or palette
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let (catalog, palette, availability, elements) = match &cli.inventory {
            Some(path) => {
                let mut inventory = Inventory::from_path(path)?;
                let missing = inventory.missing_colors()?;
                log::info!(
                    "inventory: {} part/color combinations only sold as smaller parts",
                    missing.len()
                );
                for gap in &missing {
                    log::debug!(
                        "{} lacks {} (sold as {})",
                        gap.brick_type,
                        gap.color_name,
                        gap.available_in.join(", ")
                    );
                }
                if cli.substitutes {
                    inventory.add_substitutes()?;
                }
                let snapshot = inventory.snapshot(
                    cli.kind,
                    SnapshotOptions {
                        universal_only: cli.universal,
                        allow_substitutes: cli.substitutes,
                    },
                )?;
                (
                    snapshot.catalog,
                    snapshot.palette,
                    Some(snapshot.availability),
                    Some(snapshot.elements),
                )
            }
            None => (
                BrickCatalog::standard(cli.kind)?,
                Palette::default_lego()?,
                None,
                None,
            ),
        };

        let catalog = if cli.rotate {
            catalog.with_rotations()
        } else {
            catalog
        };

        Ok(Self {
            catalog,
            matcher: ColorMatcher::new(palette),
            availability,
            elements,
        })
    }

    /// Builder bound to this context's catalog and constraints
    pub fn builder(&self, config: MosaicConfig) -> MosaicBuilder<'_> {
        let builder = MosaicBuilder::new(&self.catalog).with_config(config);
        match &self.availability {
            Some(availability) => builder.with_availability(availability),
            None => builder,
        }
    }
}

/// Orchestrates batch processing of image files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, inventory loading or file
    /// processing fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            log::info!("nothing to process");
            return Ok(());
        }

        let context = BuildContext::from_cli(&self.cli)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(&context, file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_supported_image(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &format!("expected one of: {}", SUPPORTED_EXTENSIONS.join(", ")),
                ));
            }
            Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                vec![]
            })
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).with_path(target, "read directory")? {
                let path = entry.with_path(target, "read directory")?.path();
                if path.is_file()
                    && is_supported_image(&path)
                    && !is_generated_output(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be an image file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = output_path(input_path, PREVIEW_SUFFIX);
        if output_path.exists() {
            log::info!("skipping {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, context: &BuildContext, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path);
        }

        let grid = rasterize_path(input_path, self.cli.width, self.cli.height, &context.matcher)?;

        self.enter_stage(index, 1);
        let mosaic = context.builder(self.cli.mosaic_config()).build(grid)?;

        self.enter_stage(index, 2);
        let title = input_path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        write_text(
            &output_path(input_path, INSTRUCTIONS_HTML_SUFFIX),
            &instructions_to_html(&title, &mosaic.plan, &mosaic.parts),
        )?;
        write_text(
            &output_path(input_path, INSTRUCTIONS_JSON_SUFFIX),
            &instructions_to_json(&mosaic.plan)?,
        )?;

        self.enter_stage(index, 3);
        self.export_mosaic(context, input_path, &mosaic)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }

        log::info!(
            "{}: {} pieces, {} steps in {:.2?}",
            input_path.display(),
            mosaic.placements.len(),
            mosaic.plan.total_steps(),
            start_time.elapsed()
        );

        Ok(())
    }

    fn export_mosaic(&self, context: &BuildContext, input_path: &Path, mosaic: &Mosaic) -> Result<()> {
        let (width, height) = (mosaic.grid.width(), mosaic.grid.height());

        let preview = render_mosaic(&mosaic.placements, width, height, self.cli.scale)?;
        save_png(&preview, &output_path(input_path, PREVIEW_SUFFIX))?;

        write_text(
            &output_path(input_path, PARTS_CSV_SUFFIX),
            &parts_to_csv(&mosaic.parts),
        )?;
        write_text(
            &output_path(input_path, PARTS_JSON_SUFFIX),
            &parts_to_json(&mosaic.parts, &mosaic.savings)?,
        )?;

        if let Some(elements) = &context.elements {
            let purchase = resolve_purchase_list(&mosaic.parts, elements);
            write_text(
                &output_path(input_path, PURCHASE_CSV_SUFFIX),
                &purchase_to_csv(&purchase),
            )?;
            write_text(
                &output_path(input_path, MANUAL_LOOKUP_SUFFIX),
                &manual_lookup_to_json(&purchase)?,
            )?;
            if !purchase.unresolved.is_empty() {
                log::warn!(
                    "{}: {} pieces need manual lookup",
                    input_path.display(),
                    purchase.unresolved_pieces()
                );
            }
        }

        if self.cli.steps {
            let steps_dir = output_path(input_path, STEP_IMAGES_SUFFIX);
            for step in mosaic.plan.steps() {
                let image = render_step(&mosaic.plan, step, width, height, self.cli.scale)?;
                save_png(
                    &image,
                    &steps_dir.join(format!("step_{:03}.png", step.step_number)),
                )?;
            }
        }

        Ok(())
    }

    fn enter_stage(&mut self, index: usize, stage: usize) {
        if let Some(ref mut pm) = self.progress_manager {
            pm.enter_stage(index, stage);
        }
    }
}

/// Whether the file extension is one the rasterizer accepts
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
}

// Previews written next to their sources must not be picked up as inputs
fn is_generated_output(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(PREVIEW_SUFFIX))
}

/// Path of an output next to `input_path`: `<stem><suffix>`
pub fn output_path(input_path: &Path, suffix: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let output_name = format!("{}{suffix}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

// SPDX-License-Identifier: MIT
//
// rainbow-agent — maps emotional statements onto a blended rainbow color.
//
// This is the command-line front end over the two library crates:
//
//   rainbow-color → color-space math, blending, palettes, contrast, vision
//   rainbow-mood  → keyword classification, emotion scores, strategy, agents
//
// Every subcommand is a single pure computation followed by printing. The
// only input besides the arguments is the color table, which is either the
// builtin one or a JSON file given with `--config`.
//
// Logging goes to stderr through tracing-subscriber so that stdout stays
// clean for `--json`. The filter comes from RUST_LOG when set, otherwise
// `warn` (or `debug` with `--verbose`).

use std::fmt::Write as _;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

use rainbow_color::vision::Deficiency;
use rainbow_color::{
    Cmyk, ColorSample, Lab, PaletteKind, check_color_contrast, simulate_color_blindness,
};
use rainbow_mood::config::DEFAULT_TINT;
use rainbow_mood::{
    AgentWhite, Analysis, BalancedResponse, ColorTable, Interpreter, Result,
    calculate_emotional_cmyk, emotion_palette,
};

/// Colors in the emotion palette of an `analyze` report.
const EMOTION_PALETTE_SIZE: usize = 5;

/// WCAG 2.0 minimum contrast for normal text (AA) and enhanced (AAA).
const WCAG_AA: f64 = 4.5;
const WCAG_AAA: f64 = 7.0;

// ─── Command line ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "rainbow-agent")]
#[command(version, about = "Map emotional text onto a rainbow color and a response strategy", long_about = None)]
struct Cli {
    /// Color table (JSON); the builtin table is used otherwise
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a piece of text and report the balanced agent response
    Analyze {
        /// The text to analyze
        #[arg(value_name = "TEXT")]
        text: String,

        /// Print JSON instead of a text report
        #[arg(long)]
        json: bool,
    },

    /// Show a color in every supported color space
    Convert {
        /// Hex, rgb(r, g, b), cmyk(c, m, y, k) or lab(l, a, b)
        #[arg(value_name = "COLOR")]
        color: ColorSample,
    },

    /// Derive a hue-rotation palette from a color
    Palette {
        /// Hex, rgb(…), cmyk(…) or lab(…)
        #[arg(value_name = "COLOR")]
        color: ColorSample,

        /// analogous, complementary or triadic
        #[arg(short, long, value_name = "KIND", default_value = "analogous", value_parser = parse_palette_kind)]
        kind: PaletteKind,

        /// Number of colors (analogous only)
        #[arg(short = 'n', long, value_name = "N", default_value_t = 5)]
        count: usize,
    },

    /// WCAG contrast ratio between two colors
    Contrast {
        #[arg(value_name = "COLOR")]
        first: ColorSample,

        #[arg(value_name = "COLOR")]
        second: ColorSample,
    },

    /// Simulate a color-vision deficiency (all three when KIND is omitted)
    Simulate {
        #[arg(value_name = "COLOR")]
        color: ColorSample,

        /// protanopia, deuteranopia or tritanopia
        #[arg(value_name = "KIND")]
        kind: Option<String>,
    },

    /// List the color table, or one tint with its derived colors
    Colors {
        /// Color name to inspect
        #[arg(value_name = "COLOR")]
        color: Option<String>,

        /// Tint of COLOR to inspect
        #[arg(short, long, value_name = "TINT", default_value = DEFAULT_TINT)]
        tint: String,
    },
}

fn parse_palette_kind(s: &str) -> std::result::Result<PaletteKind, String> {
    PaletteKind::from_name(s).ok_or_else(|| {
        let names: Vec<&str> = PaletteKind::all().iter().map(|k| k.name()).collect();
        format!("unknown palette kind {s:?} (expected one of: {})", names.join(", "))
    })
}

// ─── Entry point ─────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("rainbow-agent: {e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let load_table = || match &cli.config {
        Some(path) => ColorTable::from_path(path),
        None => ColorTable::builtin(),
    };

    match cli.command {
        Commands::Analyze { text, json } => {
            let white = AgentWhite::new(Interpreter::new(load_table()?)?);
            let analysis = white.interpreter().analyze(&text)?;
            let report = AnalyzeReport::new(&analysis);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.render());
            }
        }
        Commands::Convert { color } => print!("{}", render_conversions(color)),
        Commands::Palette { color, kind, count } => {
            let palette = kind.generate(color.to_lab(), count);
            print!("{}", render_palette(kind, &palette));
        }
        Commands::Contrast { first, second } => {
            let ratio = check_color_contrast(first.to_lab(), second.to_lab());
            print!("{}", render_contrast(first, second, ratio));
        }
        Commands::Simulate { color, kind } => {
            let lab = color.to_lab();
            let kinds: Vec<String> = match kind {
                Some(kind) => {
                    if Deficiency::from_name(&kind).is_none() {
                        warn!(%kind, "unknown deficiency, color left unchanged");
                    }
                    vec![kind]
                }
                None => Deficiency::all().iter().map(|d| d.name().to_owned()).collect(),
            };

            let mut rows = vec![("original".to_owned(), describe_lab(lab))];
            for kind in kinds {
                let simulated = describe_lab(simulate_color_blindness(lab, &kind));
                rows.push((kind, simulated));
            }
            print!("{}", aligned(&rows));
        }
        Commands::Colors { color, tint } => {
            let table = load_table()?;
            match color {
                Some(color) => print!("{}", render_tint(&table, &color, &tint)?),
                None => print!("{}", render_table(&table)),
            }
        }
    }
    Ok(())
}

// ─── Analyze ─────────────────────────────────────────────────────────────────

/// Balanced response plus the emotion-derived color views.
#[derive(Serialize)]
struct AnalyzeReport {
    #[serde(flatten)]
    response: BalancedResponse,
    dominant_emotion: Option<String>,
    emotional_cmyk: Cmyk,
    palette: Vec<String>,
}

impl AnalyzeReport {
    fn new(analysis: &Analysis) -> Self {
        let palette = emotion_palette(&analysis.scores, EMOTION_PALETTE_SIZE)
            .into_iter()
            .map(Lab::to_hex)
            .collect();
        Self {
            response: BalancedResponse::from_analysis(analysis),
            dominant_emotion: analysis.decision.dominant_emotion.clone(),
            emotional_cmyk: calculate_emotional_cmyk(&analysis.scores),
            palette,
        }
    }

    fn render(&self) -> String {
        let r = &self.response;
        let mut out = aligned(&[
            ("context".to_owned(), r.context.clone()),
            ("rainbow vector".to_owned(), format!("{}  {}", r.rainbow_vector, r.cmyk)),
            ("strategy".to_owned(), r.strategy.to_string()),
            ("fallback".to_owned(), if r.fallback { "yes" } else { "no" }.to_owned()),
            (
                "dominant emotion".to_owned(),
                self.dominant_emotion.clone().unwrap_or_else(|| "-".to_owned()),
            ),
            ("emotional cmyk".to_owned(), self.emotional_cmyk.to_string()),
            ("palette".to_owned(), self.palette.join(" ")),
        ]);

        out.push_str("\nDominant emotions\n");
        let ranked: Vec<(String, String)> = r
            .dominant_emotions
            .iter()
            .map(|e| (format!("  {}", e.emotion), format!("{:.2}", e.score)))
            .collect();
        out.push_str(&aligned(&ranked));

        out.push_str("\nAgents\n");
        let agents: Vec<(String, String)> = r
            .agent_feedbacks
            .values()
            .map(|fb| {
                let scores: Vec<String> = fb
                    .emotion_scores
                    .iter()
                    .map(|(label, score)| format!("{label} {score:.2}"))
                    .collect();
                (
                    format!("  {}", fb.channel),
                    format!(
                        "{}  confidence {:.2}  {}  [{}]",
                        fb.hex,
                        fb.confidence,
                        fb.suggestion,
                        scores.join(", ")
                    ),
                )
            })
            .collect();
        out.push_str(&aligned(&agents));
        out
    }
}

// ─── Color reports ───────────────────────────────────────────────────────────

fn describe_lab(lab: Lab) -> String {
    format!("{}  {lab}", lab.to_hex())
}

fn render_conversions(color: ColorSample) -> String {
    let rgb = color.to_rgb();
    let lab = color.to_lab();
    let xyz = rgb.to_xyz();
    let hsv = rgb.to_hsv();

    aligned(&[
        ("input".to_owned(), color.to_string()),
        ("hex".to_owned(), rgb.to_hex()),
        ("rgb".to_owned(), format!("{}, {}, {}", rgb.r, rgb.g, rgb.b)),
        ("cmyk".to_owned(), color.to_cmyk().to_string()),
        ("xyz".to_owned(), format!("{:.4}, {:.4}, {:.4}", xyz.x, xyz.y, xyz.z)),
        ("lab".to_owned(), lab.to_string()),
        ("hsv".to_owned(), format!("{:.1}°, {:.3}, {:.3}", hsv.h, hsv.s, hsv.v)),
        ("chroma".to_owned(), format!("{:.2}", lab.chroma())),
        ("hue angle".to_owned(), format!("{:.2}°", lab.hue_angle())),
    ])
}

fn render_palette(kind: PaletteKind, palette: &[Lab]) -> String {
    let rows: Vec<(String, String)> = palette
        .iter()
        .enumerate()
        .map(|(i, lab)| (format!("{kind} {}", i + 1), describe_lab(*lab)))
        .collect();
    aligned(&rows)
}

fn render_contrast(first: ColorSample, second: ColorSample, ratio: f64) -> String {
    let verdict = if ratio >= WCAG_AAA {
        "AAA"
    } else if ratio >= WCAG_AA {
        "AA"
    } else {
        "fail"
    };
    aligned(&[
        ("first".to_owned(), first.to_hex()),
        ("second".to_owned(), second.to_hex()),
        ("ratio".to_owned(), format!("{ratio:.2}:1")),
        ("wcag".to_owned(), verdict.to_owned()),
    ])
}

fn render_table(table: &ColorTable) -> String {
    let rows: Vec<(String, String)> = table
        .colors()
        .map(|(color, tint, t)| {
            (
                format!("{color}/{tint}"),
                format!("{}  {}  weight {}", t.hex, t.cmyk, t.weight),
            )
        })
        .collect();
    aligned(&rows)
}

fn render_tint(table: &ColorTable, color: &str, tint: &str) -> Result<String> {
    let t = table.get_color(color, tint)?;
    let complement = t.complement();

    let mut rows = vec![
        (format!("{color}/{tint}"), format!("{}  {}", t.hex, t.cmyk)),
        ("complement".to_owned(), format!("{}  {}", complement.hex, complement.cmyk)),
    ];
    for (i, a) in t.analogous(2).iter().enumerate() {
        rows.push((format!("analogous +{}°", (i + 1) * 30), format!("{}  {}", a.hex, a.cmyk)));
    }
    if tint != DEFAULT_TINT {
        if let Ok(medium) = table.get_medium(color) {
            let mixed = t.mix(medium, 0.5);
            rows.push((format!("mixed with {DEFAULT_TINT}"), format!("{}  {}", mixed.hex, mixed.cmyk)));
        }
    }
    Ok(aligned(&rows))
}

/// Two columns, the first padded to its widest entry by display width.
fn aligned(rows: &[(String, String)]) -> String {
    let width = rows.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    let mut out = String::new();
    for (key, value) in rows {
        let pad = width - key.width();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{key}{:pad$}  {value}", "");
    }
    out
}

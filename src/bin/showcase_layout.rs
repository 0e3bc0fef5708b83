//! Print the shared layout table and check a shader against it.
//!
//! ```bash
//! # Layout table under the host rule, then verify the built-in shader
//! showcase-layout
//!
//! # Compare with the WGSL rule and verify a shader on disk
//! showcase-layout --rule wgsl --shader path/to/phong.wgsl
//!
//! # Dump the bytes of one prepared frame
//! showcase-layout --dump-bytes --width 1280 --height 720
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use phong_showcase::layout::StructLayout;
use phong_showcase::shader::PHONG_SHADER;
use phong_showcase::{
    verify_shader, FragmentBufferIndex, FragmentUniforms, FrameState, LayoutResult, LayoutRule,
    PhongMaterial, SharedLayout, ShowcaseConfig, VertexBufferIndex, VertexUniforms,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Layout rule selection for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
enum CliLayoutRule {
    /// float3 padded to 16 bytes (the host structs).
    #[default]
    Padded16,
    /// WGSL host-shareable rules.
    Wgsl,
    /// Tightly packed floats.
    Packed,
}

impl From<CliLayoutRule> for LayoutRule {
    fn from(cli: CliLayoutRule) -> Self {
        match cli {
            CliLayoutRule::Padded16 => LayoutRule::Padded16,
            CliLayoutRule::Wgsl => LayoutRule::Wgsl,
            CliLayoutRule::Packed => LayoutRule::Packed,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "showcase-layout",
    about = "Inspect the Phong showcase buffer layouts",
    version
)]
struct Args {
    /// Layout rule used for the printed table.
    #[arg(long, default_value = "padded16", value_enum)]
    rule: CliLayoutRule,

    /// WGSL file to verify instead of the built-in shader.
    #[arg(long)]
    shader: Option<PathBuf>,

    /// Print the bytes of one prepared frame.
    #[arg(long)]
    dump_bytes: bool,

    /// Surface width used for the dumped frame.
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Surface height used for the dumped frame.
    #[arg(long, default_value = "720")]
    height: u32,

    /// Seed for instance placement.
    #[arg(long, default_value = "0")]
    seed: u64,
}

fn print_slots() {
    println!("Vertex buffer slots:");
    for slot in VertexBufferIndex::ALL {
        println!("  {:>2}  {}", slot.index(), slot.label());
    }
    println!("Fragment buffer slots:");
    for slot in FragmentBufferIndex::ALL {
        println!("  {:>2}  {}", slot.index(), slot.label());
    }
}

fn print_layout(layout: &StructLayout, host: &StructLayout) {
    println!(
        "struct {} (size {}, align {}{})",
        layout.name,
        layout.size,
        layout.align,
        if layout == host { "" } else { ", differs from host" }
    );
    for field in &layout.fields {
        let marker = match host.offset_of(&field.name) {
            Some(offset) if offset != field.offset => format!("  <- host {}", offset),
            _ => String::new(),
        };
        println!(
            "  {:>4}  {:<22} {:<12} {:>3} bytes{}",
            field.offset,
            field.name,
            field.kind.wgsl_name(),
            field.size,
            marker
        );
    }
}

fn print_table<T: SharedLayout>(rule: LayoutRule) {
    print_layout(&T::layout(rule), &T::host_layout());
}

fn hex_dump(label: &str, bytes: &[u8]) {
    println!("{} ({} bytes)", label, bytes.len());
    for (row, chunk) in bytes.chunks(16).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
        println!("  {:04x}  {}", row * 16, hex.join(" "));
    }
}

fn run(args: &Args) -> LayoutResult<()> {
    let rule = LayoutRule::from(args.rule);

    print_slots();
    println!();
    println!("Layouts under the {} rule:", rule.name());
    print_table::<VertexUniforms>(rule);
    print_table::<FragmentUniforms>(rule);
    print_table::<PhongMaterial>(rule);
    println!();

    let source = match &args.shader {
        Some(path) => std::fs::read_to_string(path)?,
        None => PHONG_SHADER.to_string(),
    };
    let report = verify_shader(&source)?;
    println!(
        "Shader OK: structs [{}], uniforms [{}], vertex inputs [{}]",
        report.structs.join(", "),
        report.uniforms.join(", "),
        report.vertex_inputs.join(", ")
    );

    if args.dump_bytes {
        let config = ShowcaseConfig::default();
        let mut rng = StdRng::seed_from_u64(args.seed);
        let mut state = FrameState::new(config, &mut rng);
        state.resize(args.width, args.height);
        let packet = state.prepare();

        println!();
        if let Some(draw) = packet.draws.first() {
            hex_dump("VertexUniforms[0]", draw.as_bytes());
        }
        hex_dump("FragmentUniforms", packet.fragment.as_bytes());
        hex_dump("PhongMaterial", PhongMaterial::default().as_bytes());
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

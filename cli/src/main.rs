mod chart;

use anyhow::{anyhow, bail, Context, Result};
use chart::TextChart;
use clap::{Parser, Subcommand};
use xmu::{Plotter, Universe, XmuContext, XmuFunction};

#[derive(Parser)]
#[command(name = "xmu")]
#[command(about = "Symbolic X-mu fuzzy membership toolkit")]
#[command(
    long_about = "Builds fuzzy membership functions in the inverted X-mu form, combines them\nsymbolically (set operations and extension-principle arithmetic), and samples\nthe result for inspection or rendering."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample shapes and print the (x, mu) pairs
    ///
    /// Shapes are described inline: up:a,b | down:a,b | tri:a,b,c | trap:a,b,c,d.
    /// With --combine, the shapes are folded left-to-right through one
    /// symbolic operation before sampling.
    Sample {
        /// Shape descriptions (e.g. tri:1,3,4 trap:2,3,5,6)
        #[arg(value_name = "SHAPE", required = true)]
        shapes: Vec<String>,
        /// Lower bound of the universe
        #[arg(long, default_value_t = 0.0)]
        lo: f64,
        /// Upper bound of the universe
        #[arg(long, default_value_t = 10.0)]
        hi: f64,
        /// Fold the shapes with one operation
        /// (union | intersect | difference | add | sub | mul | div | pow)
        #[arg(short, long)]
        combine: Option<String>,
        /// Number of membership levels to sample
        #[arg(short = 'n', long, default_value_t = 101)]
        levels: usize,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Render shapes as a text chart (mu across, x up)
    Plot {
        /// Shape descriptions (e.g. tri:1,3,4 trap:2,3,5,6)
        #[arg(value_name = "SHAPE", required = true)]
        shapes: Vec<String>,
        /// Lower bound of the universe
        #[arg(long, default_value_t = 0.0)]
        lo: f64,
        /// Upper bound of the universe
        #[arg(long, default_value_t = 10.0)]
        hi: f64,
        /// Fold the shapes with one operation before plotting
        #[arg(short, long)]
        combine: Option<String>,
        /// Number of membership levels to sample
        #[arg(short = 'n', long, default_value_t = 41)]
        levels: usize,
        /// Chart width in characters
        #[arg(long, default_value_t = 61)]
        width: usize,
        /// Chart height in characters
        #[arg(long, default_value_t = 21)]
        height: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Sample {
            shapes,
            lo,
            hi,
            combine,
            levels,
            json,
        } => {
            let curves = build(lo, hi, &shapes, combine.as_deref())?;
            for (label, function) in &curves {
                let curve = function.sample(levels);
                if json {
                    println!("{}", xmu::serializers::json::curve_to_json(&curve)?);
                } else {
                    println!("# {}", label);
                    println!("{:>10}  {:>10}", "mu", "x");
                    for point in &curve.points {
                        println!("{:>10.4}  {:>10.4}", point.mu, point.x);
                    }
                    for failure in &curve.skipped {
                        eprintln!("skipped mu = {:.4}: {}", failure.mu, failure.message);
                    }
                }
            }
            Ok(())
        }
        Commands::Plot {
            shapes,
            lo,
            hi,
            combine,
            levels,
            width,
            height,
        } => {
            let curves = build(lo, hi, &shapes, combine.as_deref())?;
            // Arithmetic results live on a derived universe; axes follow
            // the function being drawn, not the input bounds
            let Some((_, first)) = curves.first() else {
                bail!("no shapes given");
            };
            let axes = first.universe();
            let mut chart = TextChart::new(width, height);
            chart.prepare_plot("x-mu", &axes);
            for (label, function) in &curves {
                let curve = function.sample(levels);
                chart.add_plot(label, &curve.points);
            }
            chart.show_plot();
            Ok(())
        }
    }
}

/// Parse the shape descriptions and optionally fold them through one
/// combination, sharing a single context so chained simplifications hit
/// the memo table
fn build(
    lo: f64,
    hi: f64,
    shapes: &[String],
    combine: Option<&str>,
) -> Result<Vec<(String, XmuFunction)>> {
    let universe = Universe::new(lo, hi)?;
    let mut curves = Vec::new();
    for description in shapes {
        curves.push((description.clone(), parse_shape(universe, description)?));
    }

    let Some(op) = combine else {
        return Ok(curves);
    };
    if curves.len() < 2 {
        bail!("--combine needs at least two shapes");
    }
    // An arithmetic result lives on a derived universe and no longer
    // matches the remaining operands, so the fold cannot continue past
    // the first operation
    let arithmetic = matches!(op, "add" | "sub" | "mul" | "div" | "pow");
    if arithmetic && curves.len() > 2 {
        bail!(
            "arithmetic `--combine {}` takes exactly two shapes, got {}",
            op,
            curves.len()
        );
    }

    let mut context = XmuContext::new();
    let mut iter = curves.into_iter();
    let (mut label, mut acc) = iter
        .next()
        .ok_or_else(|| anyhow!("no shapes given"))?;
    for (next_label, next) in iter {
        acc = match op {
            "union" => context.union(&acc, &next)?,
            "intersect" => context.intersect(&acc, &next)?,
            "difference" => context.difference(&acc, &next)?,
            "add" => context.add(&acc, &next)?,
            "sub" => context.sub(&acc, &next)?,
            "mul" => context.mul(&acc, &next)?,
            "div" => context.div(&acc, &next)?,
            "pow" => context.pow(&acc, &next)?,
            other => bail!("unknown combination `{}`", other),
        };
        label = format!("{} {} {}", label, op, next_label);
    }
    Ok(vec![(label, acc)])
}

/// Parse one shape description of the form `kind:p1,p2[,p3[,p4]]`
fn parse_shape(universe: Universe, description: &str) -> Result<XmuFunction> {
    let (kind, rest) = description
        .split_once(':')
        .ok_or_else(|| anyhow!("malformed shape `{}`, expected kind:params", description))?;
    let params: Vec<f64> = rest
        .split(',')
        .map(|p| {
            p.trim()
                .parse::<f64>()
                .with_context(|| format!("bad number `{}` in `{}`", p, description))
        })
        .collect::<Result<_>>()?;

    let function = match (kind, params.as_slice()) {
        ("up", [a, b]) => XmuFunction::upward_gradient(universe, *a, *b)?,
        ("down", [a, b]) => XmuFunction::downward_gradient(universe, *a, *b)?,
        ("tri", [a, b, c]) => XmuFunction::triangular(universe, *a, *b, *c)?,
        ("trap", [a, b, c, d]) => XmuFunction::trapezoidal(universe, *a, *b, *c, *d)?,
        _ => bail!(
            "unknown shape `{}`; use up:a,b | down:a,b | tri:a,b,c | trap:a,b,c,d",
            description
        ),
    };
    Ok(function)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmu::ShapeFamily;

    fn u() -> Universe {
        Universe::new(0.0, 10.0).unwrap()
    }

    #[test]
    fn test_parse_shape_recognizes_every_kind() {
        assert_eq!(
            parse_shape(u(), "up:2,5").unwrap().family(),
            ShapeFamily::UpwardGradient
        );
        assert_eq!(
            parse_shape(u(), "down:2,5").unwrap().family(),
            ShapeFamily::DownwardGradient
        );
        assert_eq!(
            parse_shape(u(), "tri:1,3,4").unwrap().family(),
            ShapeFamily::Triangular
        );
        assert_eq!(
            parse_shape(u(), "trap:1, 3, 4, 6").unwrap().family(),
            ShapeFamily::Trapezoidal
        );
    }

    #[test]
    fn test_parse_shape_rejects_wrong_arity() {
        assert!(parse_shape(u(), "tri:1,2").is_err());
        assert!(parse_shape(u(), "up:1,2,3").is_err());
        assert!(parse_shape(u(), "trap:1,3,4").is_err());
    }

    #[test]
    fn test_parse_shape_rejects_bad_numbers() {
        let err = parse_shape(u(), "up:a,b").unwrap_err();
        assert!(format!("{:#}", err).contains("bad number"));
    }

    #[test]
    fn test_parse_shape_rejects_malformed_descriptions() {
        assert!(parse_shape(u(), "bell:1,2,3").is_err());
        assert!(parse_shape(u(), "up").is_err());
    }

    #[test]
    fn test_parse_shape_surfaces_domain_errors() {
        // Parameter outside the universe fails in the builder, not here
        assert!(parse_shape(u(), "up:2,15").is_err());
    }

    #[test]
    fn test_build_folds_set_operations() {
        let shapes = vec!["down:2,4".to_string(), "up:3,5".to_string()];
        let curves = build(1.0, 6.0, &shapes, Some("union")).unwrap();
        assert_eq!(curves.len(), 1);
        assert_eq!(curves[0].0, "down:2,4 union up:3,5");
        assert!(!curves[0].1.sample(21).points.is_empty());
    }

    #[test]
    fn test_build_folds_three_shapes_through_set_operations() {
        let shapes = vec![
            "down:2,4".to_string(),
            "up:3,5".to_string(),
            "trap:1,3,4,6".to_string(),
        ];
        let curves = build(1.0, 6.0, &shapes, Some("difference")).unwrap();
        assert_eq!(curves.len(), 1);
    }

    #[test]
    fn test_build_restricts_arithmetic_folds_to_two_shapes() {
        let shapes = vec![
            "tri:1,3,4".to_string(),
            "tri:2,3,5".to_string(),
            "tri:1,2,3".to_string(),
        ];
        let err = build(0.0, 10.0, &shapes, Some("add")).unwrap_err();
        assert!(err.to_string().contains("exactly two"));
    }

    #[test]
    fn test_build_arithmetic_result_carries_derived_universe() {
        let shapes = vec!["tri:1,3,4".to_string(), "tri:2,3,5".to_string()];
        let curves = build(0.0, 10.0, &shapes, Some("add")).unwrap();
        assert_eq!(curves.len(), 1);
        assert_eq!(curves[0].1.universe().hi(), 20.0);
    }

    #[test]
    fn test_build_needs_two_shapes_to_combine() {
        let shapes = vec!["tri:1,3,4".to_string()];
        assert!(build(0.0, 10.0, &shapes, Some("union")).is_err());
    }

    #[test]
    fn test_build_rejects_unknown_combination() {
        let shapes = vec!["tri:1,3,4".to_string(), "tri:2,3,5".to_string()];
        assert!(build(0.0, 10.0, &shapes, Some("xor")).is_err());
    }

    #[test]
    fn test_build_without_combine_keeps_every_shape() {
        let shapes = vec!["tri:1,3,4".to_string(), "up:2,5".to_string()];
        let curves = build(0.0, 10.0, &shapes, None).unwrap();
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].0, "tri:1,3,4");
    }
}

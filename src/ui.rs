#![allow(dead_code)]

//! Minimal plain-text factor-graph format read by the demo binary. No existing format to stay
//! compatible with, so the format is as small as a demo needs.

pub mod io {
    use std::error::Error;
    use std::fmt;
    use std::fs::File;
    use std::io::{BufRead, BufReader};
    use std::path::Path;

    use log::debug;

    use crate::controller::{MaxSumController, MaxSumOptions};
    use crate::function::DiscreteFunction;
    use crate::registry;

    #[derive(Debug)]
    pub struct ParseError(String);

    impl fmt::Display for ParseError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "factor graph file: {}", self.0)
        }
    }

    impl Error for ParseError {}

    fn next_line(lines: &mut impl Iterator<Item = std::io::Result<String>>) -> Result<String, Box<dyn Error>> {
        loop {
            let line = lines.next().ok_or_else(|| ParseError("unexpected end of file".into()))??;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return Ok(trimmed.to_string());
        }
    }

    fn parse_ints(line: &str) -> Result<Vec<usize>, Box<dyn Error>> {
        line.split_whitespace()
            .map(|tok| tok.parse::<usize>().map_err(|e| Box::new(ParseError(e.to_string())) as Box<dyn Error>))
            .collect()
    }

    fn parse_floats(line: &str) -> Result<Vec<f64>, Box<dyn Error>> {
        line.split_whitespace()
            .map(|tok| tok.parse::<f64>().map_err(|e| Box::new(ParseError(e.to_string())) as Box<dyn Error>))
            .collect()
    }

    /// Reads a factor graph description from `path`:
    ///
    /// ```text
    /// <num_vars>
    /// <size_0> <size_1> ... <size_{n-1}>
    /// <num_factors>
    /// <arity> <var_0> ... <var_{arity-1}>      // repeated num_factors times, vars ascending
    /// <value_0> <value_1> ... <value_{product-1}>   // flattened column-major
    /// ```
    ///
    /// Variables are identified by their position (0-indexed) in the size list.
    pub fn read_instance(path: impl AsRef<Path>) -> Result<MaxSumController, Box<dyn Error>> {
        let path = path.as_ref();
        debug!("reading factor graph instance from {}", path.display());
        let file = File::open(path)?;
        let mut lines = BufReader::new(file).lines();

        let num_vars = *parse_ints(&next_line(&mut lines)?)?
            .first()
            .ok_or_else(|| ParseError("missing variable count".into()))?;
        let sizes = parse_ints(&next_line(&mut lines)?)?;
        if sizes.len() != num_vars {
            return Err(Box::new(ParseError(format!(
                "declared {} variables but {} domain sizes",
                num_vars,
                sizes.len()
            ))));
        }
        for (var, &size) in sizes.iter().enumerate() {
            registry::register_variable(var, size)?;
        }

        let num_factors = *parse_ints(&next_line(&mut lines)?)?
            .first()
            .ok_or_else(|| ParseError("missing factor count".into()))?;

        let mut controller = MaxSumController::new(MaxSumOptions::default());
        for fid in 0..num_factors {
            let header = parse_ints(&next_line(&mut lines)?)?;
            let (&arity, vars) = header.split_first().ok_or_else(|| ParseError("empty factor header".into()))?;
            if arity != vars.len() {
                return Err(Box::new(ParseError(format!(
                    "factor {} declared arity {} but listed {} variables",
                    fid,
                    arity,
                    vars.len()
                ))));
            }
            let values = parse_floats(&next_line(&mut lines)?)?;
            let function = DiscreteFunction::from_values(vars.to_vec(), values)?;
            controller.set_factor(fid, function)?;
        }

        debug!(
            "loaded instance with {} variables and {} factors",
            controller.no_vars(),
            controller.no_factors()
        );
        Ok(controller)
    }

}

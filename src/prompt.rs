use crate::config::Config;
use crate::position::Corner;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const EXIT: &str = "0";

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// `Ok(None)` means the user entered 0 or closed input.
    pub fn collect(mut self) -> io::Result<Option<Config>> {
        writeln!(self.output, "Enter data to add watermarks to images")?;

        let Some(watermark) = self.ask_until("\nPath to watermark image", |answer| {
            let path = PathBuf::from(answer);
            path.is_file()
                .then_some(path)
                .ok_or("there is no image at that path")
        })?
        else {
            return Ok(None);
        };

        let Some(target) = self.ask_until("\nPath to folder with images", |answer| {
            let path = PathBuf::from(answer);
            path.is_dir()
                .then_some(path)
                .ok_or("there is no folder at that path")
        })?
        else {
            return Ok(None);
        };

        writeln!(
            self.output,
            "\n[i] The next answers are optional, press ENTER to skip them"
        )?;

        let Some(result) = self.ask_until(
            "\nFolder where the timestamped result folder is created (default: current folder)",
            |answer| {
                if answer.is_empty() {
                    return env::current_dir().map_err(|_| "cannot read the current folder");
                }
                let path = PathBuf::from(answer);
                path.is_dir()
                    .then_some(path)
                    .ok_or("there is no folder at that path")
            },
        )?
        else {
            return Ok(None);
        };

        let Some(size) = self.ask_until("\nSize in pixels, e.g. 100x100", |answer| {
            if answer.is_empty() {
                return Ok(None);
            }
            parse_size(answer).map(Some).ok_or("expected WIDTHxHEIGHT")
        })?
        else {
            return Ok(None);
        };

        let mut size_percent = None;
        if size.is_none() {
            let Some(pct) = self.ask_until("\nSize in percent, at least 1", |answer| {
                optional_number(answer, 1, u32::MAX)
            })?
            else {
                return Ok(None);
            };
            size_percent = pct;
        }

        let Some(transparency) = self.ask_until("\nTransparency level between 1 and 100", |answer| {
            optional_number(answer, 1, 100)
        })?
        else {
            return Ok(None);
        };

        let Some(position) = self.ask_until("\nPosition: TL, TR, BL or BR (default BL)", |answer| {
            if answer.is_empty() {
                return Ok(None);
            }
            answer
                .parse::<Corner>()
                .map(|corner| Some(corner.code().to_string()))
                .map_err(|_| "expected TL, TR, BL or BR")
        })?
        else {
            return Ok(None);
        };

        let config = Config {
            watermark,
            target,
            result,
            position,
            size,
            size_percent,
            transparency,
            quiet: false,
        };
        writeln!(self.output, "\nWatermark    - {}", config.watermark.display())?;
        writeln!(self.output, "Target       - {}", config.target.display())?;
        writeln!(self.output, "Result       - {}", config.result.display())?;
        Ok(Some(config))
    }

    fn ask_until<T>(
        &mut self,
        question: &str,
        mut accept: impl FnMut(&str) -> Result<T, &'static str>,
    ) -> io::Result<Option<T>> {
        loop {
            write!(self.output, "{} (enter 0 to exit): ", question)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let answer = line.trim();
            if answer == EXIT {
                return Ok(None);
            }

            match accept(answer) {
                Ok(value) => return Ok(Some(value)),
                Err(reason) => writeln!(self.output, "[!] Wrong input: {}, try again.", reason)?,
            }
        }
    }
}

fn parse_size(answer: &str) -> Option<(u32, u32)> {
    let (w, h) = answer.split_once(['x', 'X'])?;
    let w = w.trim().parse().ok()?;
    let h = h.trim().parse().ok()?;
    (w > 0 && h > 0).then_some((w, h))
}

fn optional_number(answer: &str, min: u32, max: u32) -> Result<Option<u32>, &'static str> {
    if answer.is_empty() {
        return Ok(None);
    }
    match answer.parse::<u32>() {
        Ok(n) if (min..=max).contains(&n) => Ok(Some(n)),
        _ => Err("number out of range"),
    }
}

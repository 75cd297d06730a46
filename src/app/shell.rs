use crate::core::finder::StoreFinder;
use crate::domain::model::{DriveThruFilter, Origin, SearchQuery};
use crate::domain::ports::Storage;
use crate::utils::error::{FinderError, Result};
use crate::utils::validation::{parse_drive_thru, parse_radius, validate_non_empty_string};
use std::io::{BufRead, Write};

pub const MENU: &str = "*** Store Finder ***
    1 - Find Stores by City and State
    2 - Find Stores within Distance of City and State
    3 - Find Stores within Distance of Zip Code
    4 - Quit";

pub const GOODBYE: &str = "Thank you for using the Store Finder App";

enum Flow {
    Continue,
    Exit,
}

/// Menu loop over any line-oriented input. Only I/O failures on the console
/// itself end the loop early; search errors are reported and the menu returns.
pub struct Shell<'a, S: Storage, R: BufRead, W: Write> {
    finder: &'a StoreFinder<S>,
    input: R,
    output: W,
}

impl<'a, S: Storage, R: BufRead, W: Write> Shell<'a, S, R, W> {
    pub fn new(finder: &'a StoreFinder<S>, input: R, output: W) -> Self {
        Self {
            finder,
            input,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };

            let flow = match choice.trim() {
                "1" => self.find_by_city_state().await?,
                "2" => self.find_near_city_state().await?,
                "3" => self.find_near_zip().await?,
                "4" => {
                    writeln!(self.output, "{}", GOODBYE)?;
                    Flow::Exit
                }
                other => {
                    tracing::debug!("Unknown menu choice: {:?}", other);
                    writeln!(self.output, "Error. Try again.")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                break;
            }
        }
        Ok(())
    }

    /// `None` on end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt_required(&mut self, message: &str, field: &str, error: &str) -> Result<Option<String>> {
        loop {
            let Some(value) = self.prompt(message)? else {
                return Ok(None);
            };
            match validate_non_empty_string(field, &value) {
                Ok(()) => return Ok(Some(value.trim().to_string())),
                Err(_) => writeln!(self.output, "{}", error)?,
            }
        }
    }

    fn prompt_radius(&mut self) -> Result<Option<i64>> {
        loop {
            let Some(value) = self.prompt("Search radius in miles: ")? else {
                return Ok(None);
            };
            match parse_radius(&value) {
                Ok(radius) => return Ok(Some(radius)),
                Err(_) => writeln!(self.output, "Error. Enter a whole number of miles.")?,
            }
        }
    }

    fn prompt_drive_thru(&mut self) -> Result<Option<DriveThruFilter>> {
        loop {
            let Some(value) = self.prompt("Only show stores with drive-thru? y/n (blank for all) ")? else {
                return Ok(None);
            };
            match parse_drive_thru(&value) {
                Ok(filter) => return Ok(Some(filter)),
                Err(_) => writeln!(self.output, "Error. Enter y, n, or leave blank.")?,
            }
        }
    }

    async fn find_by_city_state(&mut self) -> Result<Flow> {
        let (city, state) = loop {
            let Some(city) = self.prompt("Enter a city: ")? else {
                return Ok(Flow::Exit);
            };
            let Some(state) = self.prompt("Enter a state abbreviation: ")? else {
                return Ok(Flow::Exit);
            };
            if validate_non_empty_string("city", &city).is_ok()
                && validate_non_empty_string("state", &state).is_ok()
            {
                break (city, state);
            }
            writeln!(self.output, "Error. Enter a city and a state.")?;
        };

        self.run_query(SearchQuery::CityState { city, state }).await?;
        Ok(Flow::Continue)
    }

    async fn find_near_city_state(&mut self) -> Result<Flow> {
        let Some(radius_miles) = self.prompt_radius()? else {
            return Ok(Flow::Exit);
        };
        let Some(city) = self.prompt("Enter home city name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(state) = self.prompt_required(
            "Enter home state abbreviation: ",
            "state",
            "Error: enter a state",
        )?
        else {
            return Ok(Flow::Exit);
        };
        let Some(drive_thru) = self.prompt_drive_thru()? else {
            return Ok(Flow::Exit);
        };

        self.run_query(SearchQuery::Radius {
            origin: Origin::CityState {
                city: city.trim().to_string(),
                state,
            },
            radius_miles,
            drive_thru,
        })
        .await?;
        Ok(Flow::Continue)
    }

    async fn find_near_zip(&mut self) -> Result<Flow> {
        let Some(radius_miles) = self.prompt_radius()? else {
            return Ok(Flow::Exit);
        };
        let Some(zip) = self.prompt_required("Enter zip code: ", "zip", "Error: enter a zip code")?
        else {
            return Ok(Flow::Exit);
        };
        let Some(drive_thru) = self.prompt_drive_thru()? else {
            return Ok(Flow::Exit);
        };

        self.run_query(SearchQuery::Radius {
            origin: Origin::Zip(zip),
            radius_miles,
            drive_thru,
        })
        .await?;
        Ok(Flow::Continue)
    }

    /// Search errors become console messages; only console I/O errors propagate.
    async fn run_query(&mut self, query: SearchQuery) -> Result<()> {
        let outcome = match self.finder.search(&query).await {
            Ok(result) => self.finder.present(&result, &mut self.output).await.map(|_| ()),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => writeln!(self.output)?,
            Err(FinderError::IoError(e)) => return Err(FinderError::IoError(e)),
            Err(e) => {
                tracing::warn!("❌ Search failed: {} ({:?})", e, e.category());
                tracing::debug!("💡 {}", e.recovery_suggestion());
                writeln!(self.output, "{}\n", failure_message(&query, &e))?;
            }
        }
        Ok(())
    }
}

fn failure_message(query: &SearchQuery, error: &FinderError) -> String {
    match (error, query) {
        (
            FinderError::Geocode { .. },
            SearchQuery::Radius {
                origin: Origin::Zip(_),
                ..
            },
        ) => "Error. Invalid Zipcode".to_string(),
        (FinderError::Geocode { .. }, _) => "Error. Invalid city or state".to_string(),
        _ => error.user_friendly_message(),
    }
}

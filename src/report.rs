//! Console report formatting

use crate::comparator::Comparison;
use crate::models::{Coordinates, ForecastSample, MonthlyExtremes};
use std::io::{self, Write};

/// Header naming the place, the compared month and today's forecast
pub fn write_header<W: Write>(
    out: &mut W,
    city_name: &str,
    coordinates: &Coordinates,
    month: u32,
    year: i32,
    forecast: &ForecastSample,
) -> io::Result<()> {
    writeln!(out, "{city_name} {coordinates}, month {month} of {year}")?;
    writeln!(
        out,
        "Today's forecast: max {:.1}F, min {:.1}F",
        forecast.max_day_temp, forecast.min_day_temp
    )?;
    writeln!(out)
}

/// The four monthly extremes
pub fn write_extremes<W: Write>(out: &mut W, extremes: &MonthlyExtremes) -> io::Result<()> {
    writeln!(out, "Max Day Temperature of the Month:    {}", extremes.max_day)?;
    writeln!(out, "Min Day Temperature of the Month:    {}", extremes.min_day)?;
    writeln!(out, "Max Night Temperature of the Month:  {}", extremes.max_night)?;
    writeln!(out, "Min Night Temperature of the Month:  {}", extremes.min_night)
}

/// Range line, a blank line, then the band message
pub fn write_comparison<W: Write>(out: &mut W, comparison: &Comparison) -> io::Result<()> {
    write!(out, "{}", comparison.rendered_range)?;
    writeln!(out)?;
    writeln!(out, "{}", comparison.band)
}

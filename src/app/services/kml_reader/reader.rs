//! Single-pass streaming extractor for MOSMIX KML bulletins.

use std::collections::HashSet;
use std::io::BufRead;

use chrono::{DateTime, Utc};
use quick_xml::Reader;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use tracing::{debug, info};

use crate::app::models::PointForecast;
use crate::app::models::quantity::{AngleUnit, LengthUnit, Measurement};
use crate::app::services::forecast_assembler::ForecastAssembler;
use crate::constants::{
    COORDINATES_DELIMITER, STATION_COORDINATES_UNIT, STATION_HEIGHT_UNIT,
    XML_COORDINATES_ELEMENT, XML_EXTENDED_DATA_ELEMENT, XML_FORECAST_ELEMENT, XML_NAME_ELEMENT,
    XML_TIMESTEP_ELEMENT, XML_TIMESTEPS_ELEMENT, XML_VALUE_ELEMENT, ELEMENT_NAME_ATTRIBUTE,
};
use crate::{Error, Result};

/// Extracts complete point forecasts for selected stations from a MOSMIX KML
/// bulletin.
///
/// The document is consumed as a forward-only event stream, so memory use is
/// bounded by one station block regardless of how many stations the bulletin
/// carries. Extraction is all-or-nothing per call: any structural defect in
/// the axis or in a requested station aborts with an error instead of
/// returning partial series.
#[derive(Debug, Default)]
pub struct MosmixKmlReader;

impl MosmixKmlReader {
    pub fn new() -> Self {
        Self
    }

    /// Read the bulletin and return one [`PointForecast`] per requested
    /// station found in the document, in document order.
    ///
    /// Stations requested but absent from the bulletin are silently omitted;
    /// an empty result is not an error.
    pub fn read<R: BufRead>(
        &self,
        input: R,
        model_run_time: DateTime<Utc>,
        station_ids: &[&str],
    ) -> Result<Vec<PointForecast>> {
        let requested: HashSet<&str> = station_ids.iter().copied().collect();
        let mut cursor = EventCursor::new(input);

        let forecast_times = read_time_axis(&mut cursor)?;
        debug!(steps = forecast_times.len(), "read forecast time axis");

        let mut series = Vec::new();
        while let Some(station_id) = cursor.next_station_name()? {
            if !requested.contains(station_id.as_str()) {
                continue;
            }
            debug!(station = %station_id, "extracting station block");
            series.push(read_station(
                &mut cursor,
                station_id,
                &forecast_times,
                model_run_time,
            )?);
        }

        info!(
            stations = series.len(),
            requested = requested.len(),
            "bulletin extraction complete"
        );
        Ok(series)
    }
}

/// Collect the global time axis and enforce the strictly-increasing order
/// every downstream window computation relies on.
fn read_time_axis<R: BufRead>(cursor: &mut EventCursor<R>) -> Result<Vec<DateTime<Utc>>> {
    let mut forecast_times: Vec<DateTime<Utc>> = Vec::new();
    while let Some(text) = cursor.next_time_step()? {
        let instant = DateTime::parse_from_rfc3339(&text)
            .map_err(|e| Error::time_parsing(format!("invalid time step '{text}'"), e))?
            .with_timezone(&Utc);
        if let Some(&last) = forecast_times.last() {
            if instant <= last {
                return Err(Error::malformed_input(
                    format!("time axis is not strictly increasing at '{text}'"),
                    None,
                ));
            }
        }
        forecast_times.push(instant);
    }
    if forecast_times.is_empty() {
        return Err(Error::missing_element(
            XML_TIMESTEPS_ELEMENT,
            "bulletin carries no forecast time axis",
        ));
    }
    Ok(forecast_times)
}

/// Consume one station block and assemble its forecast series.
fn read_station<R: BufRead>(
    cursor: &mut EventCursor<R>,
    station_id: String,
    forecast_times: &[DateTime<Utc>],
    model_run_time: DateTime<Utc>,
) -> Result<PointForecast> {
    let mut table = super::ElementTable::new();
    while let Some((symbol, values)) = cursor.next_forecast_element(&station_id)? {
        table.append(symbol, values.split_whitespace().map(str::to_owned));
    }

    let coordinates = cursor.element_text_before_eof(
        XML_COORDINATES_ELEMENT,
        &format!("station {station_id} block"),
    )?;
    let (longitude, latitude, height) = parse_coordinates(&coordinates, &station_id)?;

    let forecasts = ForecastAssembler::new(&station_id, &table).assemble(forecast_times)?;
    Ok(PointForecast::new(
        station_id,
        longitude,
        latitude,
        height,
        model_run_time,
        forecasts,
    ))
}

/// Split a `lon,lat,height` coordinate string into measurements.
fn parse_coordinates(
    text: &str,
    station_id: &str,
) -> Result<(
    Measurement<AngleUnit>,
    Measurement<AngleUnit>,
    Measurement<LengthUnit>,
)> {
    let components: Vec<&str> = text.split(COORDINATES_DELIMITER).map(str::trim).collect();
    if components.len() != 3 {
        return Err(Error::malformed_input(
            format!("station {station_id} coordinates '{text}' must have 3 components"),
            None,
        ));
    }
    let mut values = [0.0_f64; 3];
    for (slot, component) in values.iter_mut().zip(&components) {
        *slot = component.parse().map_err(|_| {
            Error::malformed_input(
                format!("station {station_id} coordinate component '{component}' is not numeric"),
                None,
            )
        })?;
    }
    Ok((
        Measurement::new(values[0], STATION_COORDINATES_UNIT),
        Measurement::new(values[1], STATION_COORDINATES_UNIT),
        Measurement::new(values[2], STATION_HEIGHT_UNIT),
    ))
}

fn start_is(event: &BytesStart<'_>, element: &str) -> bool {
    event.local_name().as_ref() == element.as_bytes()
}

fn end_is(event: &BytesEnd<'_>, element: &str) -> bool {
    event.local_name().as_ref() == element.as_bytes()
}

/// Forward-only cursor over the document's XML events.
///
/// Each combinator scans ahead to the next structural landmark it is
/// responsible for, so the caller never sees raw events.
struct EventCursor<R: BufRead> {
    reader: Reader<R>,
}

impl<R: BufRead> EventCursor<R> {
    fn new(input: R) -> Self {
        Self {
            reader: Reader::from_reader(input),
        }
    }

    /// Text of the next `TimeStep`, or `None` once the axis container closes.
    fn next_time_step(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(e) if start_is(&e, XML_TIMESTEP_ELEMENT) => {
                    return self.text_content(XML_TIMESTEP_ELEMENT).map(Some);
                }
                Event::End(e) if end_is(&e, XML_TIMESTEPS_ELEMENT) => return Ok(None),
                Event::Eof => return Ok(None),
                _ => {}
            }
        }
    }

    /// Id of the next station block, or `None` at the end of the document.
    fn next_station_name(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(e) if start_is(&e, XML_NAME_ELEMENT) => {
                    return self.text_content(XML_NAME_ELEMENT).map(Some);
                }
                Event::Eof => return Ok(None),
                _ => {}
            }
        }
    }

    /// The next `(symbol, value list)` pair of the current station's
    /// `ExtendedData`, or `None` once that container closes.
    fn next_forecast_element(&mut self, station_id: &str) -> Result<Option<(String, String)>> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(e) if start_is(&e, XML_FORECAST_ELEMENT) => {
                    let symbol = symbol_attribute(&e, station_id)?;
                    let values = self.element_text_before_eof(
                        XML_VALUE_ELEMENT,
                        &format!("station {station_id} element {symbol}"),
                    )?;
                    return Ok(Some((symbol, values)));
                }
                Event::End(e) if end_is(&e, XML_EXTENDED_DATA_ELEMENT) => return Ok(None),
                Event::Eof => {
                    return Err(Error::malformed_input(
                        format!("document ended inside station {station_id} parameter data"),
                        None,
                    ));
                }
                _ => {}
            }
        }
    }

    /// Scan forward to the next `element` start and return its text content.
    /// Reaching end of document first is a structural error.
    fn element_text_before_eof(&mut self, element: &str, context: &str) -> Result<String> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(e) if start_is(&e, element) => return self.text_content(element),
                Event::Eof => return Err(Error::missing_element(element, context)),
                _ => {}
            }
        }
    }

    /// Accumulate text until the current element closes, trimming the
    /// surrounding document whitespace.
    fn text_content(&mut self, element: &str) -> Result<String> {
        let mut buf = Vec::new();
        let mut text = String::new();
        loop {
            buf.clear();
            match self.reader.read_event_into(&mut buf)? {
                Event::Text(t) => text.push_str(&t.unescape()?),
                Event::CData(t) => text.push_str(&String::from_utf8_lossy(&t)),
                Event::End(_) => return Ok(text.trim().to_string()),
                Event::Start(e) => {
                    let child = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    return Err(Error::malformed_input(
                        format!("unexpected child element '{child}' inside '{element}'"),
                        None,
                    ));
                }
                Event::Eof => {
                    return Err(Error::malformed_input(
                        format!("document ended inside '{element}'"),
                        None,
                    ));
                }
                _ => {}
            }
        }
    }
}

/// The `elementName` attribute of a `Forecast` element.
fn symbol_attribute(event: &BytesStart<'_>, station_id: &str) -> Result<String> {
    for attribute in event.attributes() {
        let attribute =
            attribute.map_err(|e| Error::malformed_input("invalid attribute", Some(e.into())))?;
        if attribute.key.local_name().as_ref() == ELEMENT_NAME_ATTRIBUTE.as_bytes() {
            return Ok(attribute.unescape_value()?.into_owned());
        }
    }
    Err(Error::malformed_input(
        format!("station {station_id} has a {XML_FORECAST_ELEMENT} element without a {ELEMENT_NAME_ATTRIBUTE} attribute"),
        None,
    ))
}

//! RSS feed generation.
//!
//! Serializes an ordered event list into an RSS 2.0 document with
//! iCal-flavored timestamp elements. The serializer does not sort; callers
//! pass events pre-sorted ascending by start date.

use chrono::{DateTime, FixedOffset};

use crate::event::Event;

/// Channel metadata for the feed envelope. The link is the deployment's own
/// base address, derived at request time rather than stored.
#[derive(Debug, Clone)]
pub struct FeedChannel {
    pub title: String,
    pub link: String,
    pub description: String,
}

/// Serialize events into an RSS 2.0 document.
///
/// One `<item>` per event, in the given order. The description element is
/// always present (empty when the field is absent) so feed readers see a
/// consistent item schema; the location element is emitted only when set.
pub fn serialize_feed(events: &[Event], channel: &FeedChannel) -> String {
    let mut out = String::with_capacity(512 + events.len() * 256);

    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n");
    out.push_str("<rss version=\"2.0\" xmlns:ical=\"http://www.w3.org/2002/12/cal/ical#\">\n");
    out.push_str("  <channel>\n");
    out.push_str(&format!("    <title>{}</title>\n", escape_xml(&channel.title)));
    out.push_str(&format!("    <link>{}</link>\n", escape_xml(&channel.link)));
    out.push_str(&format!(
        "    <description>{}</description>\n",
        escape_xml(&channel.description)
    ));

    for event in events {
        push_item(&mut out, event);
    }

    out.push_str("  </channel>\n");
    out.push_str("</rss>\n");

    out
}

fn push_item(out: &mut String, event: &Event) {
    out.push_str("    <item>\n");
    out.push_str(&format!("      <title>{}</title>\n", escape_xml(&event.title)));
    out.push_str(&format!(
        "      <description>{}</description>\n",
        escape_xml(event.description.as_deref().unwrap_or(""))
    ));
    out.push_str(&format!(
        "      <ical:dtstart>{}</ical:dtstart>\n",
        ical_stamp(&event.start_date)
    ));
    out.push_str(&format!(
        "      <ical:dtend>{}</ical:dtend>\n",
        ical_stamp(&event.end_date)
    ));
    if let Some(location) = &event.location {
        out.push_str(&format!(
            "      <ical:location>{}</ical:location>\n",
            escape_xml(location)
        ));
    }
    out.push_str(&format!("      <guid>{}</guid>\n", escape_xml(&event.id)));
    out.push_str("    </item>\n");
}

/// Format a timestamp as a compact iCal stamp, `YYYYMMDD'T'HHMMSS`.
///
/// The source wall-clock value is used verbatim; no timezone suffix, no UTC
/// normalization.
fn ical_stamp(dt: &DateTime<FixedOffset>) -> String {
    dt.naive_local().format("%Y%m%dT%H%M%S").to_string()
}

/// Escape text for use as XML element content.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

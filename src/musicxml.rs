//! MusicXML export of a laid-out score, for opening a drill in notation
//! software.

use crate::layout::{MeasureLayout, NotationToken, ScoreLayout};
use crate::pitch::{Accidental, Pitch};
use crate::rhythm::Duration;

/// Convert a ScoreLayout to MusicXML format
pub fn to_musicxml(score: &ScoreLayout, title: Option<&str>) -> String {
    let mut xml = String::new();

    // XML declaration and doctype
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<!DOCTYPE score-partwise PUBLIC "-//Recordare//DTD MusicXML 4.0 Partwise//EN" "http://www.musicxml.org/dtds/partwise.dtd">"#);
    xml.push('\n');

    xml.push_str(r#"<score-partwise version="4.0">"#);
    xml.push('\n');

    if let Some(title) = title {
        xml.push_str("  <work>\n");
        xml.push_str(&format!("    <work-title>{}</work-title>\n", escape_xml(title)));
        xml.push_str("  </work>\n");
    }

    xml.push_str("  <part-list>\n");
    xml.push_str("    <score-part id=\"P1\">\n");
    xml.push_str("      <part-name>Piano</part-name>\n");
    xml.push_str("    </score-part>\n");
    xml.push_str("  </part-list>\n");

    xml.push_str("  <part id=\"P1\">\n");
    for (i, measure) in score.measures.iter().enumerate() {
        xml.push_str(&measure_to_xml(measure, i + 1, i == 0));
    }
    xml.push_str("  </part>\n");
    xml.push_str("</score-partwise>\n");

    xml
}

fn measure_to_xml(measure: &MeasureLayout, number: usize, include_attributes: bool) -> String {
    let mut xml = String::new();

    xml.push_str(&format!("    <measure number=\"{}\">\n", number));

    // Treble clef and 4/4 on the first measure only
    if include_attributes {
        xml.push_str("      <attributes>\n");
        xml.push_str("        <divisions>4</divisions>\n");
        xml.push_str("        <time>\n");
        xml.push_str("          <beats>4</beats>\n");
        xml.push_str("          <beat-type>4</beat-type>\n");
        xml.push_str("        </time>\n");
        xml.push_str("        <clef>\n");
        xml.push_str("          <sign>G</sign>\n");
        xml.push_str("          <line>2</line>\n");
        xml.push_str("        </clef>\n");
        xml.push_str("      </attributes>\n");
    }

    for token in &measure.tokens {
        match token {
            NotationToken::Note(event) => xml.push_str(&note_to_xml(&event.pitch, event.duration)),
            NotationToken::Rest(duration) => xml.push_str(&rest_to_xml(*duration)),
        }
    }

    xml.push_str("    </measure>\n");
    xml
}

fn note_to_xml(pitch: &Pitch, duration: Duration) -> String {
    let mut xml = String::new();

    xml.push_str("      <note>\n");
    xml.push_str("        <pitch>\n");
    xml.push_str(&format!("          <step>{}</step>\n", pitch.class.name.letter()));
    match pitch.class.accidental {
        Accidental::Sharp => xml.push_str("          <alter>1</alter>\n"),
        Accidental::Flat => xml.push_str("          <alter>-1</alter>\n"),
        Accidental::Natural => {}
    }
    xml.push_str(&format!("          <octave>{}</octave>\n", pitch.octave));
    xml.push_str("        </pitch>\n");

    xml.push_str(&format!("        <duration>{}</duration>\n", divisions(duration)));
    xml.push_str(&format!("        <type>{}</type>\n", duration.musicxml_type()));

    match pitch.class.accidental {
        Accidental::Sharp => xml.push_str("        <accidental>sharp</accidental>\n"),
        Accidental::Flat => xml.push_str("        <accidental>flat</accidental>\n"),
        Accidental::Natural => {}
    }

    xml.push_str("      </note>\n");
    xml
}

fn rest_to_xml(duration: Duration) -> String {
    let mut xml = String::new();

    xml.push_str("      <note>\n");
    xml.push_str("        <rest/>\n");
    xml.push_str(&format!("        <duration>{}</duration>\n", divisions(duration)));
    xml.push_str(&format!("        <type>{}</type>\n", duration.musicxml_type()));
    xml.push_str("      </note>\n");
    xml
}

/// 4 divisions per quarter note
fn divisions(duration: Duration) -> u32 {
    (duration.beats() * 4.0).round() as u32
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

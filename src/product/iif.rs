//! Streaming writer for IIF metadata documents.
//!
//! The document has four fixed sections (administration, file information,
//! temporal parameters and mission specific parameters) and is written
//! compact, on a single line after the XML declaration.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::SimulatorError;
use crate::naming::format_metadata_time;
use crate::product::ProductDescriptor;

const NAMESPACES: [(&str, &str); 3] = [
    ("xmlns:java", "http://xml.apache.org/xaLan/java"),
    ("xmlns:gml", "http://www.opengis.net/gml"),
    ("xmlns:safe", "http://www.esa.int/safe/1:2"),
];

const INGEST_ID: &str = "(rid://ingest)";
const QUALITY: &str = "APPROVED";

pub struct IifWriter<W: Write> {
    writer: W,
}

impl<W: Write> IifWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn write_document(&mut self, product: &ProductDescriptor) -> io::Result<()> {
        writeln!(self.writer, "<?xml version='1.0' encoding='UTF-8'?>")?;

        write!(self.writer, "<IIF")?;
        for (key, value) in NAMESPACES {
            write!(self.writer, " {}=\"{}\"", key, escape_xml_attr(value))?;
        }
        write!(self.writer, "><item>")?;

        self.write_administration(product)?;
        self.write_file_information(product)?;
        self.write_parameters(product)?;
        self.write_specific_parameters(product)?;

        write!(self.writer, "</item></IIF>")?;
        self.writer.flush()
    }

    fn write_administration(&mut self, product: &ProductDescriptor) -> io::Result<()> {
        let code = product.product_type.code();

        write!(self.writer, "<administration>")?;
        self.write_element("id", INGEST_ID)?;
        self.write_element("type", code)?;
        write!(self.writer, "<keys>")?;
        self.write_feature("originalName", &product.name)?;
        self.write_feature("productType", code)?;
        self.write_feature("code", code)?;
        write!(self.writer, "</keys></administration>")
    }

    fn write_file_information(&mut self, product: &ProductDescriptor) -> io::Result<()> {
        write!(self.writer, "<fileInformation><file><location>")?;
        self.write_element("name", &product.name)?;
        write!(self.writer, "</location></file></fileInformation>")
    }

    fn write_parameters(&mut self, product: &ProductDescriptor) -> io::Result<()> {
        write!(self.writer, "<parameters><temporalCoverage>")?;
        self.write_element("startTime", &format_metadata_time(&product.granule.start))?;
        self.write_element("stopTime", &format_metadata_time(&product.granule.stop))?;
        write!(self.writer, "</temporalCoverage>")?;
        self.write_element("quality", QUALITY)?;
        write!(self.writer, "</parameters>")
    }

    fn write_specific_parameters(&mut self, product: &ProductDescriptor) -> io::Result<()> {
        let granule = &product.granule;

        write!(self.writer, "<specificParameters>")?;
        self.write_feature("receivingGroundStation", product.ground_station)?;
        self.write_feature(
            "receivingStartTime",
            &format_metadata_time(&granule.receive_start),
        )?;
        self.write_feature(
            "receivingStopTime",
            &format_metadata_time(&granule.receive_stop),
        )?;
        self.write_feature("granuleNumber", &granule.number.to_string())?;
        self.write_feature("granulePosition", granule.position.as_str())?;
        self.write_feature("dumpStart", &format_metadata_time(&granule.dump_start))?;
        self.write_feature("ISIPProvider", product.provider)?;
        write!(self.writer, "</specificParameters>")
    }

    fn write_element(&mut self, tag: &str, text: &str) -> io::Result<()> {
        write!(self.writer, "<{tag}>{}</{tag}>", escape_xml_text(text))
    }

    fn write_feature(&mut self, key: &str, text: &str) -> io::Result<()> {
        write!(
            self.writer,
            "<feature key=\"{}\">{}</feature>",
            escape_xml_attr(key),
            escape_xml_text(text)
        )
    }
}

/// Writes the document to `path`, replacing any existing file.
pub fn write_iif_file(path: &Path, product: &ProductDescriptor) -> Result<(), SimulatorError> {
    let to_error = |source| SimulatorError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_error)?;
    let mut writer = IifWriter::new(BufWriter::new(file));
    writer.write_document(product).map_err(to_error)
}

fn escape_xml_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_xml_attr(s: &str) -> String {
    escape_xml_text(s).replace('"', "&quot;")
}

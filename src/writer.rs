//! XSD serialization
//!
//! Writes a compiled schema as an XSD document with `quick-xml`. Built-in
//! types carry the `xs` prefix; generated type names are written bare and
//! resolve against the default namespace.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::assembler::CompiledSchema;
use crate::components::{SchemaItem, XsdComplexType, XsdElement, XsdSimpleType};
use crate::error::{Error, Result};
use crate::namespaces::NamespaceContext;

const XS_SCHEMA: &str = "xs:schema";
const XS_SIMPLE_TYPE: &str = "xs:simpleType";
const XS_COMPLEX_TYPE: &str = "xs:complexType";
const XS_RESTRICTION: &str = "xs:restriction";
const XS_ENUMERATION: &str = "xs:enumeration";
const XS_SEQUENCE: &str = "xs:sequence";
const XS_ELEMENT: &str = "xs:element";

struct SchemaWriter<W: Write> {
    writer: Writer<W>,
    namespaces: NamespaceContext,
}

impl<W: Write> SchemaWriter<W> {
    fn new(out: W, target_namespace: Option<&str>) -> Self {
        Self {
            writer: Writer::new_with_indent(out, b' ', 2),
            namespaces: NamespaceContext::for_schema(target_namespace),
        }
    }

    fn write(mut self, schema: &CompiledSchema) -> Result<W> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let mut root = BytesStart::new(XS_SCHEMA);
        for (prefix, uri) in self.namespaces.prefixes() {
            root.push_attribute((format!("xmlns:{}", prefix).as_str(), uri));
        }
        if let Some(ns) = &schema.target_namespace {
            root.push_attribute(("targetNamespace", ns.as_str()));
            root.push_attribute(("xmlns", ns.as_str()));
            root.push_attribute(("elementFormDefault", "qualified"));
        }
        self.writer.write_event(Event::Start(root))?;

        for item in &schema.items {
            match item {
                SchemaItem::SimpleType(st) => self.write_simple_type(st)?,
                SchemaItem::ComplexType(ct) => self.write_complex_type(ct)?,
                SchemaItem::Element(elem) => self.write_element(elem)?,
            }
        }

        self.writer.write_event(Event::End(BytesEnd::new(XS_SCHEMA)))?;
        let mut out = self.writer.into_inner();
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(out)
    }

    fn write_simple_type(&mut self, st: &XsdSimpleType) -> Result<()> {
        let mut start = BytesStart::new(XS_SIMPLE_TYPE);
        start.push_attribute(("name", st.name.as_str()));
        self.writer.write_event(Event::Start(start))?;

        let base = self.namespaces.qualify(&st.base_type)?;
        let mut restriction = BytesStart::new(XS_RESTRICTION);
        restriction.push_attribute(("base", base.as_str()));
        if st.enumerations.is_empty() {
            self.writer.write_event(Event::Empty(restriction))?;
        } else {
            self.writer.write_event(Event::Start(restriction))?;
            for value in &st.enumerations {
                let mut facet = BytesStart::new(XS_ENUMERATION);
                facet.push_attribute(("value", value.as_str()));
                self.writer.write_event(Event::Empty(facet))?;
            }
            self.writer
                .write_event(Event::End(BytesEnd::new(XS_RESTRICTION)))?;
        }

        self.writer
            .write_event(Event::End(BytesEnd::new(XS_SIMPLE_TYPE)))?;
        Ok(())
    }

    fn write_complex_type(&mut self, ct: &XsdComplexType) -> Result<()> {
        let mut start = BytesStart::new(XS_COMPLEX_TYPE);
        start.push_attribute(("name", ct.name.as_str()));
        self.writer.write_event(Event::Start(start))?;

        if ct.is_empty() {
            self.writer
                .write_event(Event::Empty(BytesStart::new(XS_SEQUENCE)))?;
        } else {
            self.writer
                .write_event(Event::Start(BytesStart::new(XS_SEQUENCE)))?;
            for elem in &ct.sequence {
                self.write_particle(elem)?;
            }
            self.writer
                .write_event(Event::End(BytesEnd::new(XS_SEQUENCE)))?;
        }

        self.writer
            .write_event(Event::End(BytesEnd::new(XS_COMPLEX_TYPE)))?;
        Ok(())
    }

    fn write_particle(&mut self, elem: &XsdElement) -> Result<()> {
        let type_name = self.namespaces.qualify(&elem.type_name)?;
        let min = elem.occurs.min_attribute();
        let max = elem.occurs.max_attribute();

        let mut start = BytesStart::new(XS_ELEMENT);
        if let Some(min) = &min {
            start.push_attribute(("minOccurs", min.as_str()));
        }
        if let Some(max) = &max {
            start.push_attribute(("maxOccurs", max.as_str()));
        }
        start.push_attribute(("name", elem.name.as_str()));
        if elem.nillable {
            start.push_attribute(("nillable", "true"));
        }
        start.push_attribute(("type", type_name.as_str()));
        self.writer.write_event(Event::Empty(start))?;
        Ok(())
    }

    fn write_element(&mut self, elem: &XsdElement) -> Result<()> {
        let type_name = self.namespaces.qualify(&elem.type_name)?;
        let mut start = BytesStart::new(XS_ELEMENT);
        start.push_attribute(("name", elem.name.as_str()));
        start.push_attribute(("type", type_name.as_str()));
        self.writer.write_event(Event::Empty(start))?;
        Ok(())
    }
}

/// Write a compiled schema as an XSD document
pub fn write_schema<W: Write>(schema: &CompiledSchema, out: W) -> Result<()> {
    SchemaWriter::new(out, schema.target_namespace.as_deref()).write(schema)?;
    Ok(())
}

/// Render a compiled schema as an XSD string
pub fn to_xsd_string(schema: &CompiledSchema) -> Result<String> {
    let buf = SchemaWriter::new(Vec::new(), schema.target_namespace.as_deref()).write(schema)?;
    String::from_utf8(buf).map_err(|e| Error::Xml(e.to_string()))
}

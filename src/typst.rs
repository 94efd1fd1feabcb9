use crate::reference::Comparison;

#[derive(Clone)]
pub struct Data {
    pub name: String,
    pub vertices: usize,
    pub comparison: Comparison,
    pub svg: Option<String>,
}

pub fn make_typst_document(data: &[Data]) -> String {
    let mut doc = String::from("#set page(paper: \"a4\")\n#set text(size: 11pt)\n\n");

    for item in data {
        let c = &item.comparison;
        doc.push_str(&format!("== * {} *\n\n", item.name));
        doc.push_str(&format!("{} vertices\n\n", item.vertices));

        doc.push_str("#table(\n");
        doc.push_str("  columns: (1fr, 1fr, 1fr),\n");
        doc.push_str("  inset: 10pt,\n");
        doc.push_str("  align: horizon,\n");
        doc.push_str("  [*Model*], [*Area*], [*Deviation*],\n");
        doc.push_str(&format!(
            "  [Sphere (R = 6371 km)], [{:.2} ha], [],\n",
            c.spherical
        ));
        doc.push_str(&format!(
            "  [WGS84 geodesic], [{:.2} ha], [{:+.3}%],\n",
            c.geodesic,
            100f64 * c.geodesic_deviation()
        ));
        doc.push_str(&format!(
            "  [UTM planar], [{:.2} ha], [{:+.3}%],\n",
            c.planar,
            100f64 * c.planar_deviation()
        ));
        doc.push_str(")\n\n");

        if let Some(svg) = &item.svg {
            doc.push_str("#align(center, image(\n");
            doc.push_str(&format!("  bytes(```{}```.text),\n", svg));
            doc.push_str("  width: 80%\n");
            doc.push_str("))\n\n");
        }

        doc.push_str("#pagebreak()\n\n");
    }

    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_sections() {
        let data = vec![
            Data {
                name: "North Field".to_string(),
                vertices: 4,
                comparison: Comparison {
                    spherical: 123.64,
                    geodesic: 123.0,
                    planar: 124.0,
                },
                svg: Some("<svg></svg>".to_string()),
            },
            Data {
                name: "South Field".to_string(),
                vertices: 2,
                comparison: Comparison {
                    spherical: 0.0,
                    geodesic: 0.0,
                    planar: 0.0,
                },
                svg: None,
            },
        ];
        let doc = make_typst_document(&data);
        assert!(doc.contains("== * North Field *"));
        assert!(doc.contains("[123.64 ha]"));
        assert!(doc.contains("bytes(```<svg></svg>```.text)"));
        assert!(doc.contains("== * South Field *"));
        assert_eq!(doc.matches("#pagebreak()").count(), 2);
        assert_eq!(doc.matches("image(").count(), 1);
    }
}

use crate::core::model::{PlotKind, Snp};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const ROW_CLASSES: [&str; 2] = ["d0", "d1"];

/// Writes `index.html`: one table row per SNP in the given order, linking the
/// three plot images. SNP names go into the page unescaped.
pub fn write(path: &Path, title: &str, snps: &[&Snp]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    write_index(&mut w, title, snps)?;
    w.flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

pub fn write_index<W: Write>(w: &mut W, title: &str, snps: &[&Snp]) -> Result<()> {
    header(w, title)?;
    for (i, snp) in snps.iter().enumerate() {
        snp_row(w, snp, ROW_CLASSES[i % ROW_CLASSES.len()])?;
    }
    footer(w)
}

fn header<W: Write>(w: &mut W, title: &str) -> Result<()> {
    writeln!(w, "<HTML>")?;
    writeln!(w, "<HEAD>")?;
    writeln!(w, "<TITLE>{} Plots</TITLE>", title)?;
    writeln!(w, "<style type=\"text/css\">")?;
    writeln!(
        w,
        "tr.d0 td {{ background-color: #E5E5E5; color: black; }}"
    )?;
    writeln!(
        w,
        "tr.d1 td {{ background-color: #F5F5F5; color: black; }}"
    )?;
    writeln!(w, "</style>")?;
    writeln!(w, "</HEAD>")?;
    writeln!(w, "<BODY>")?;
    writeln!(w, "<TABLE BORDER=1>")?;
    writeln!(w, "<TR>")?;
    for th in [
        "SNP",
        "Chr",
        "Position",
        "Plot 1 (Raw)",
        "Plot 2 (Corrected)",
        "Plot 3 (Norm R vs Theta)",
    ] {
        writeln!(w, "<TH>{}</TH>", th)?;
    }
    writeln!(w, "</TR>")?;
    Ok(())
}

fn snp_row<W: Write>(w: &mut W, snp: &Snp, class: &str) -> Result<()> {
    writeln!(w, "<TR class={}>", class)?;
    writeln!(w, "<TD>{}</TD>", snp.name)?;
    writeln!(w, "<TD>{}</TD>", snp.chr)?;
    writeln!(w, "<TD>{}</TD>", snp.pos)?;
    for kind in PlotKind::ALL {
        writeln!(
            w,
            "<TD><A HREF=\"{}\">{}</A></TD>",
            kind.file_name(&snp.name),
            link_text(kind)
        )?;
    }
    writeln!(w, "</TR>")?;
    Ok(())
}

fn link_text(kind: PlotKind) -> &'static str {
    match kind {
        PlotKind::Raw => "Raw",
        PlotKind::Corrected => "Corrected",
        PlotKind::RTheta => "R Theta",
    }
}

fn footer<W: Write>(w: &mut W) -> Result<()> {
    writeln!(w, "</TABLE>")?;
    writeln!(w, "</BODY>")?;
    writeln!(w, "</HTML>")?;
    Ok(())
}

//! Paragraph reveal timing for slides.
//!
//! A slide's timing graph is one main sequence. Every bullet list revealed by
//! paragraph contributes one step per paragraph; steps run one after another
//! in list order, the first when the slide begins, and each leaves its
//! paragraph visible.

use crate::common::xml::XmlWriter;
use crate::ooxml::error::Result;

/// One reveal step: paragraph `paragraph` of shape `spid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingStep {
    /// Shape id of the bullet list
    pub spid: u32,
    /// 0-based paragraph index within the shape's text body
    pub paragraph: u32,
}

/// Counter for `cTn` ids, scoped to one timing graph.
#[derive(Debug)]
struct NodeIds {
    next: u32,
}

impl NodeIds {
    fn new() -> Self {
        Self { next: 1 }
    }

    fn next(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Ordered reveal steps of one slide plus the shapes they build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimingGraph {
    steps: Vec<TimingStep>,
    built_shapes: Vec<u32>,
    reveal_duration_ms: u32,
}

impl TimingGraph {
    /// Create an empty graph whose steps last `reveal_duration_ms` each.
    pub fn new(reveal_duration_ms: u32) -> Self {
        Self {
            steps: Vec::new(),
            built_shapes: Vec::new(),
            reveal_duration_ms,
        }
    }

    /// Append one step per paragraph of shape `spid`, in paragraph order.
    ///
    /// A shape without paragraphs adds nothing.
    pub fn reveal_paragraphs(&mut self, spid: u32, paragraphs: usize) {
        if paragraphs == 0 {
            return;
        }
        self.built_shapes.push(spid);
        self.steps.extend((0..paragraphs as u32).map(|paragraph| TimingStep { spid, paragraph }));
    }

    /// Get the steps in playback order.
    pub fn steps(&self) -> &[TimingStep] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the graph has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Consume the graph, returning its steps.
    pub fn into_steps(self) -> Vec<TimingStep> {
        self.steps
    }

    /// Write the `<p:timing>` element. Writes nothing for an empty graph.
    pub fn write(&self, w: &mut XmlWriter) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }

        let mut ids = NodeIds::new();
        let mut id_buf = itoa::Buffer::new();
        let mut num_buf = itoa::Buffer::new();

        w.start("p:timing", &[])?;
        w.start("p:tnLst", &[])?;
        w.start("p:par", &[])?;
        w.start(
            "p:cTn",
            &[
                ("id", id_buf.format(ids.next())),
                ("dur", "indefinite"),
                ("restart", "never"),
                ("nodeType", "tmRoot"),
            ],
        )?;
        w.start("p:childTnLst", &[])?;
        w.start("p:seq", &[("concurrent", "1"), ("nextAc", "seek")])?;
        let main_seq = ids.next();
        w.start(
            "p:cTn",
            &[
                ("id", id_buf.format(main_seq)),
                ("dur", "indefinite"),
                ("nodeType", "mainSeq"),
            ],
        )?;
        w.start("p:childTnLst", &[])?;

        // A single group that starts with the main sequence; the steps inside
        // it are offset so each begins when the previous one has finished.
        w.start("p:par", &[])?;
        w.start("p:cTn", &[("id", id_buf.format(ids.next())), ("fill", "hold")])?;
        w.start("p:stCondLst", &[])?;
        w.empty("p:cond", &[("delay", "indefinite")])?;
        w.start("p:cond", &[("evt", "onBegin"), ("delay", "0")])?;
        w.empty("p:tn", &[("val", num_buf.format(main_seq))])?;
        w.end()?;
        w.end()?;
        w.start("p:childTnLst", &[])?;

        let duration = u64::from(self.reveal_duration_ms);
        for (position, step) in self.steps.iter().enumerate() {
            let offset = duration * position as u64;
            self.write_step(w, &mut ids, step, offset)?;
        }

        w.end()?; // childTnLst
        w.end()?; // cTn
        w.end()?; // par

        w.end()?; // mainSeq childTnLst
        w.end()?; // mainSeq cTn
        write_slide_condition(w, "p:prevCondLst", "onPrev")?;
        write_slide_condition(w, "p:nextCondLst", "onNext")?;
        w.end()?; // seq
        w.end()?; // childTnLst
        w.end()?; // tmRoot cTn
        w.end()?; // par
        w.end()?; // tnLst

        w.start("p:bldLst", &[])?;
        for &spid in &self.built_shapes {
            w.empty(
                "p:bldP",
                &[("spid", id_buf.format(spid)), ("grpId", "0"), ("build", "p")],
            )?;
        }
        w.end()?;

        w.end()?; // timing
        Ok(())
    }

    fn write_step(
        &self,
        w: &mut XmlWriter,
        ids: &mut NodeIds,
        step: &TimingStep,
        offset_ms: u64,
    ) -> Result<()> {
        let mut id_buf = itoa::Buffer::new();
        let mut num_buf = itoa::Buffer::new();

        w.start("p:par", &[])?;
        w.start("p:cTn", &[("id", id_buf.format(ids.next())), ("fill", "hold")])?;
        w.start("p:stCondLst", &[])?;
        w.empty("p:cond", &[("delay", num_buf.format(offset_ms))])?;
        w.end()?;
        w.start("p:childTnLst", &[])?;

        w.start("p:par", &[])?;
        w.start(
            "p:cTn",
            &[
                ("id", id_buf.format(ids.next())),
                ("presetID", "1"),
                ("presetClass", "entr"),
                ("presetSubtype", "0"),
                ("fill", "hold"),
                ("grpId", "0"),
                ("nodeType", "afterEffect"),
            ],
        )?;
        w.start("p:stCondLst", &[])?;
        w.empty("p:cond", &[("delay", "0")])?;
        w.end()?;
        w.start("p:childTnLst", &[])?;

        w.start("p:set", &[])?;
        w.start("p:cBhvr", &[])?;
        w.start(
            "p:cTn",
            &[
                ("id", id_buf.format(ids.next())),
                ("dur", num_buf.format(self.reveal_duration_ms)),
                ("fill", "hold"),
            ],
        )?;
        w.start("p:stCondLst", &[])?;
        w.empty("p:cond", &[("delay", "0")])?;
        w.end()?;
        w.end()?;
        w.start("p:tgtEl", &[])?;
        w.start("p:spTgt", &[("spid", id_buf.format(step.spid))])?;
        w.start("p:txEl", &[])?;
        w.empty(
            "p:pRg",
            &[
                ("st", id_buf.format(step.paragraph)),
                ("end", num_buf.format(step.paragraph)),
            ],
        )?;
        w.end()?;
        w.end()?;
        w.end()?;
        w.start("p:attrNameLst", &[])?;
        w.leaf("p:attrName", &[], "style.visibility")?;
        w.end()?;
        w.end()?; // cBhvr
        w.start("p:to", &[])?;
        w.empty("p:strVal", &[("val", "visible")])?;
        w.end()?;
        w.end()?; // set

        w.end()?; // childTnLst
        w.end()?; // effect cTn
        w.end()?; // par

        w.end()?; // childTnLst
        w.end()?; // step cTn
        w.end()?; // par
        Ok(())
    }
}

fn write_slide_condition(w: &mut XmlWriter, list: &str, event: &str) -> Result<()> {
    w.start(list, &[])?;
    w.start("p:cond", &[("evt", event), ("delay", "0")])?;
    w.start("p:tgtEl", &[])?;
    w.empty("p:sldTgt", &[])?;
    w.end()?;
    w.end()?;
    w.end()?;
    Ok(())
}

use crate::common::*;
use rect::{Label, PixelSize, PixelTLBR, RatioTLBR};

/// Number of header fields in a detection record.
pub const HEADER_LEN: usize = 4;
/// Number of fields each box label occupies: class id plus four corners.
pub const BOX_LABEL_LEN: usize = 5;

/// A box with its class id, in fractions of the image size.
pub type RatioLabel = Label<RatioTLBR<f64>, usize>;

/// One parsed line of a dataset list file.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRecord {
    pub index: usize,
    pub path: String,
    pub kind: RecordKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordKind {
    Detection {
        size: PixelSize<u32>,
        labels: Vec<RatioLabel>,
    },
    Classification {
        classes: Vec<usize>,
    },
}

/// Formats one detection record line.
///
/// The line is `idx \t 4 \t 5 \t W \t H \t labels... \t path`, with one
/// `class, x1, y1, x2, y2` group per box. Box coordinates are normalized
/// by the image size and clamped into `[0, 1]`.
pub fn build_record(
    index: usize,
    path: &str,
    size: &PixelSize<u32>,
    bboxes: &[PixelTLBR<f64>],
    classes: &[usize],
) -> Result<String> {
    ensure!(
        bboxes.len() == classes.len(),
        "got {} boxes but {} class ids",
        bboxes.len(),
        classes.len()
    );
    ensure!(
        size.h() > 0 && size.w() > 0,
        "image dimensions must be positive, got {}x{}",
        size.w(),
        size.h()
    );
    let header = [
        HEADER_LEN.to_string(),
        BOX_LABEL_LEN.to_string(),
        size.w().to_string(),
        size.h().to_string(),
    ];

    let size = size.cast::<f64>();
    let labels: Vec<String> = izip!(classes, bboxes)
        .map(|(&class, bbox)| -> Result<_> {
            let ratio = bbox.to_ratio_tlbr(&size)?;
            Ok([
                class.to_string(),
                ratio.l().to_string(),
                ratio.t().to_string(),
                ratio.r().to_string(),
                ratio.b().to_string(),
            ])
        })
        .flatten_ok()
        .try_collect()?;

    let line = iter::once(index.to_string())
        .chain(header)
        .chain(labels)
        .chain(iter::once(path.to_string()))
        .join("\t");
    Ok(line)
}

/// Formats one classification record line: no header, bare class ids.
pub fn build_classification_record(index: usize, path: &str, classes: &[usize]) -> String {
    iter::once(index.to_string())
        .chain(classes.iter().map(|class| class.to_string()))
        .chain(iter::once(path.to_string()))
        .join("\t")
}

/// Parses one list-file line back into a record.
///
/// A line counts as a detection record when it starts with the literal
/// `4, 5` header and its label fields come in groups of five; anything
/// else parses as a classification record.
pub fn parse_record(line: &str) -> Result<ListRecord> {
    let fields: Vec<&str> = line.split('\t').collect();
    ensure!(
        fields.len() >= 3,
        "a record needs an index, at least one label field, and a path, got {} fields",
        fields.len()
    );

    let index = fields[0]
        .parse()
        .with_context(|| format!("invalid record index '{}'", fields[0]))?;
    let path = fields[fields.len() - 1].to_string();
    let middle = &fields[1..fields.len() - 1];

    let has_header = middle.len() >= HEADER_LEN
        && middle[0].parse() == Ok(HEADER_LEN)
        && middle[1].parse() == Ok(BOX_LABEL_LEN)
        && (middle.len() - HEADER_LEN) % BOX_LABEL_LEN == 0;

    let kind = if has_header {
        let w: u32 = middle[2]
            .parse()
            .with_context(|| format!("invalid image width '{}'", middle[2]))?;
        let h: u32 = middle[3]
            .parse()
            .with_context(|| format!("invalid image height '{}'", middle[3]))?;
        ensure!(w > 0 && h > 0, "image dimensions must be positive, got {}x{}", w, h);

        let labels: Vec<RatioLabel> = middle[HEADER_LEN..]
            .chunks(BOX_LABEL_LEN)
            .map(|chunk| -> Result<_> {
                let class = chunk[0]
                    .parse()
                    .with_context(|| format!("invalid class id '{}'", chunk[0]))?;
                let coords: Vec<f64> = chunk[1..]
                    .iter()
                    .map(|field| {
                        field
                            .parse::<f64>()
                            .with_context(|| format!("invalid box coordinate '{}'", field))
                    })
                    .try_collect()?;
                let rect = RatioTLBR::try_from_tlbr([coords[1], coords[0], coords[3], coords[2]])?;
                Ok(Label { rect, class })
            })
            .try_collect()?;

        RecordKind::Detection {
            size: PixelSize::from_hw(h, w),
            labels,
        }
    } else {
        let classes = middle
            .iter()
            .map(|field| {
                field
                    .parse::<usize>()
                    .with_context(|| format!("invalid class id '{}'", field))
            })
            .try_collect()?;
        RecordKind::Classification { classes }
    };

    Ok(ListRecord { index, path, kind })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn detection_record_example() {
        let size = PixelSize::from_hw(200, 100);
        let bboxes = [PixelTLBR::from_tlbr([20.0, 10.0, 80.0, 50.0])];
        let line = build_record(0, "a.jpg", &size, &bboxes, &[3]).unwrap();
        assert_eq!(line, "0\t4\t5\t100\t200\t3\t0.1\t0.1\t0.5\t0.4\ta.jpg");
    }

    #[test]
    fn detection_field_count() {
        let size = PixelSize::from_hw(480, 640);
        let bboxes = [
            PixelTLBR::from_tlbr([10.0, 10.0, 50.0, 50.0]),
            PixelTLBR::from_tlbr([100.0, 200.0, 300.0, 400.0]),
        ];
        let line = build_record(3, "img.png", &size, &bboxes, &[0, 2]).unwrap();
        let count = line.split('\t').count();
        assert_eq!(count, 1 + HEADER_LEN + bboxes.len() * BOX_LABEL_LEN + 1);
    }

    #[test]
    fn out_of_bounds_boxes_are_clamped() {
        let size = PixelSize::from_hw(100, 100);
        let bboxes = [PixelTLBR::from_tlbr([-30.0, -10.0, 250.0, 130.0])];
        let line = build_record(0, "a.jpg", &size, &bboxes, &[1]).unwrap();

        let record = parse_record(&line).unwrap();
        let labels = match record.kind {
            RecordKind::Detection { labels, .. } => labels,
            _ => panic!("expected a detection record"),
        };
        for coord in labels[0].rect.tlbr() {
            assert!((0.0..=1.0).contains(&coord));
        }
    }

    #[test]
    fn classification_record() {
        let line = build_classification_record(7, "b.png", &[2, 9]);
        assert_eq!(line, "7\t2\t9\tb.png");
    }

    #[test]
    fn mismatched_label_counts_fail() {
        let size = PixelSize::from_hw(100, 100);
        let bboxes = [PixelTLBR::from_tlbr([0.0, 0.0, 10.0, 10.0])];
        assert!(build_record(0, "a.jpg", &size, &bboxes, &[1, 2]).is_err());
    }

    #[test]
    fn zero_dimensions_fail() {
        let size = PixelSize::from_hw(0, 100);
        let bboxes = [PixelTLBR::from_tlbr([0.0, 0.0, 10.0, 10.0])];
        assert!(build_record(0, "a.jpg", &size, &bboxes, &[1]).is_err());
    }

    #[test]
    fn parse_round_trip() {
        let size = PixelSize::from_hw(200, 100);
        let bboxes = [PixelTLBR::from_tlbr([20.0, 10.0, 80.0, 50.0])];
        let line = build_record(5, "imgs/a.jpg", &size, &bboxes, &[3]).unwrap();

        let record = parse_record(&line).unwrap();
        assert_eq!(record.index, 5);
        assert_eq!(record.path, "imgs/a.jpg");
        let (parsed_size, labels) = match record.kind {
            RecordKind::Detection { size, labels } => (size, labels),
            _ => panic!("expected a detection record"),
        };
        assert_eq!(parsed_size, size);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].class, 3);
        assert_abs_diff_eq!(labels[0].rect.t(), 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(labels[0].rect.l(), 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(labels[0].rect.b(), 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(labels[0].rect.r(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn parse_classification_line() {
        let record = parse_record("7\t2\t9\tb.png").unwrap();
        assert_eq!(record.index, 7);
        assert_eq!(record.path, "b.png");
        assert_eq!(
            record.kind,
            RecordKind::Classification { classes: vec![2, 9] }
        );
    }

    #[test]
    fn parse_rejects_malformed_lines() {
        assert!(parse_record("").is_err());
        assert!(parse_record("7\tb.png").is_err());
        assert!(parse_record("not-a-number\t3\tpath").is_err());
        assert!(parse_record("0\t4\t5\t100\t200\t3\t0.1\tbad\t0.5\t0.4\ta.jpg").is_err());
    }
}

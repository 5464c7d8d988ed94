//! Diagram construction and rule evaluation.

use super::*;

fn comp() -> Composition {
    Composition::new(1.0, 1.0, 1.0, 298.15)
}

fn line(key: &str, a: f64, b: f64, c: f64) -> BoundaryLine {
    BoundaryLine::new(key, Intercept::Constant(a), b, c).unwrap()
}

/// y = 5 (horizontal), x = 5 (vertical), y = x (diagonal), y = -x + 20 (anti-diagonal)
fn reference_lines() -> Vec<BoundaryLine> {
    vec![
        line("H", -5.0, 0.0, 1.0),
        line("V", -5.0, 1.0, 0.0),
        line("D", 0.0, 1.0, -1.0),
        line("E", -20.0, 1.0, 1.0),
    ]
}

#[test]
fn test_half_plane_rules() {
    let d = Diagram::new("ref", reference_lines()).unwrap();
    let p = comp();

    assert!(Rule::above("H").holds(0.0, 6.0, &p, &d));
    assert!(!Rule::above("H").holds(0.0, 4.0, &p, &d));
    assert!(Rule::below("D").holds(3.0, 2.0, &p, &d));
    assert!(Rule::right_of("V").holds(6.0, 0.0, &p, &d));
    assert!(Rule::left_of("V").holds(4.0, 100.0, &p, &d));
    assert!(!Rule::left_of("D").holds(4.0, 3.0, &p, &d));
}

#[test]
fn test_rule_on_the_line_is_strict() {
    let d = Diagram::new("ref", reference_lines()).unwrap();
    assert!(!Rule::above("H").holds(1.0, 5.0, &comp(), &d));
    assert!(!Rule::below("H").holds(1.0, 5.0, &comp(), &d));
}

#[test]
fn test_any_of() {
    let d = Diagram::new("ref", reference_lines()).unwrap();
    let rule = Rule::Special(Special::AnyOf(vec![Rule::above("H"), Rule::right_of("V")]));
    assert!(rule.holds(6.0, 0.0, &comp(), &d));
    assert!(rule.holds(0.0, 6.0, &comp(), &d));
    assert!(!rule.holds(0.0, 0.0, &comp(), &d));
}

#[test]
fn test_right_of_crossing() {
    let d = Diagram::new("ref", reference_lines()).unwrap();
    // D and E cross at (10, 10)
    let rule = Rule::Special(Special::RightOfCrossing {
        first: "D".into(),
        second: "E".into(),
    });
    assert!(rule.holds(11.0, -50.0, &comp(), &d));
    assert!(!rule.holds(9.0, 50.0, &comp(), &d));
}

#[test]
fn test_crossings_ordered() {
    let d = Diagram::new("ref", reference_lines()).unwrap();
    // H x D at (5, 5); H x E at (15, 5)
    let ordered = |ascending| {
        Rule::Special(Special::CrossingsOrdered {
            first: ("H".into(), "D".into()),
            second: ("H".into(), "E".into()),
            ascending,
        })
    };
    assert!(ordered(true).holds(0.0, 0.0, &comp(), &d));
    assert!(!ordered(false).holds(0.0, 0.0, &comp(), &d));
}

#[test]
fn test_crossing_of_parallel_lines_fails_rule() {
    let mut lines = reference_lines();
    lines.push(line("H2", -7.0, 0.0, 1.0));
    let d = Diagram::new("ref", lines).unwrap();
    let rule = Rule::Special(Special::RightOfCrossing {
        first: "H".into(),
        second: "H2".into(),
    });
    assert!(!rule.holds(1e6, 0.0, &comp(), &d));
}

#[test]
fn test_unknown_reference_rejected() {
    let lines = vec![line("A/B", 0.0, 1.0, 1.0).with_rules(vec![Rule::above("A/C")])];
    let err = Diagram::new("bad", lines).unwrap_err();
    assert_eq!(
        err,
        DiagramError::UnknownReference {
            line: "A/B".into(),
            reference: "A/C".into()
        }
    );
}

#[test]
fn test_unknown_reference_inside_any_of_rejected() {
    let lines = vec![line("A/B", 0.0, 1.0, 1.0)
        .with_rules(vec![Rule::Special(Special::AnyOf(vec![Rule::below("X")]))])];
    assert!(matches!(
        Diagram::new("bad", lines),
        Err(DiagramError::UnknownReference { .. })
    ));
}

#[test]
fn test_above_vertical_reference_rejected() {
    let mut lines = reference_lines();
    lines.push(line("A/B", 0.0, 1.0, 1.0).with_rules(vec![Rule::above("V")]));
    assert!(matches!(
        Diagram::new("bad", lines),
        Err(DiagramError::InvalidRule { .. })
    ));
}

#[test]
fn test_left_of_horizontal_reference_rejected() {
    let mut lines = reference_lines();
    lines.push(line("A/B", 0.0, 1.0, 1.0).with_rules(vec![Rule::left_of("H")]));
    assert!(matches!(
        Diagram::new("bad", lines),
        Err(DiagramError::InvalidRule { .. })
    ));
}

#[test]
fn test_duplicate_key_rejected() {
    let lines = vec![line("A/B", 0.0, 1.0, 1.0), line("A/B", 1.0, 1.0, 1.0)];
    assert_eq!(
        Diagram::new("dup", lines).unwrap_err(),
        DiagramError::DuplicateLine("A/B".into())
    );
}

#[test]
fn test_all_intersections_skips_parallel_pairs() {
    let lines = vec![
        line("H", -5.0, 0.0, 1.0),
        line("H2", -7.0, 0.0, 1.0),
        line("V", -5.0, 1.0, 0.0),
    ];
    let d = Diagram::new("ref", lines).unwrap();
    let pts = d.all_intersections(&comp());
    assert_eq!(pts.len(), 2);
    assert!(pts.contains(&[5.0, 5.0]));
    assert!(pts.contains(&[5.0, 7.0]));
}

use super::*;

#[test]
fn clones_share_one_value() {
    let a = Setting::new(Dimension::Overworld);
    let b = a.clone();
    b.set(Dimension::End);
    assert_eq!(a.get(), Dimension::End);
    assert!(a.shares_with(&b));
    assert!(!a.shares_with(&Setting::new(Dimension::End)));
}

#[test]
fn bind_value_pushes_fixed_value() {
    let dim = Setting::new(Dimension::Overworld);
    let to_end = bind_value(&dim, Dimension::End);
    let to_nether = bind_value(&dim, Dimension::Nether);

    to_end();
    assert_eq!(dim.get(), Dimension::End);
    to_nether();
    assert_eq!(dim.get(), Dimension::Nether);
    dim.set(Dimension::Overworld);
    to_end();
    assert_eq!(dim.get(), Dimension::End);
}

#[test]
fn bind_toggle_flips() {
    let grid = Setting::new(false);
    let toggle = bind_toggle(&grid);
    toggle();
    assert!(grid.get());
    toggle();
    assert!(!grid.get());
}

#[test]
fn only_end_is_void() {
    assert!(Dimension::End.is_void());
    assert!(!Dimension::Overworld.is_void());
    assert!(!Dimension::Nether.is_void());
}

#[test]
fn dimension_parses_names() {
    assert_eq!("End".parse::<Dimension>().unwrap(), Dimension::End);
    assert_eq!(" nether ".parse::<Dimension>().unwrap(), Dimension::Nether);
    assert!("moon".parse::<Dimension>().is_err());
    for d in [Dimension::Overworld, Dimension::Nether, Dimension::End] {
        assert_eq!(d.name().parse::<Dimension>().unwrap(), d);
    }
}

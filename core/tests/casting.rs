use pretty_assertions::assert_eq;
use roarray_core::{Array, Error, ImmutableArray, ReadOnlyArray, element};

// =============================================================================
// Helpers
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Shape {
    sides: u32,
}

#[derive(Debug, Clone, PartialEq)]
#[repr(transparent)]
struct Polygon(Shape);

#[derive(Debug, Clone, PartialEq)]
#[repr(transparent)]
struct Square(Polygon);

#[derive(Debug, Clone, PartialEq)]
struct Color(u32);

element!(Shape, Color);
element!(unsafe Polygon: Shape);
element!(unsafe Square: Polygon, Shape);

fn squares() -> Array<Square> {
    Array::from(vec![
        Square(Polygon(Shape { sides: 4 })),
        Square(Polygon(Shape { sides: 4 })),
    ])
}

// =============================================================================
// Static upcasts
// =============================================================================

#[test]
fn cast_up_keeps_the_buffer() {
    let squares = squares();
    let view = ReadOnlyArray::from(&squares);

    let polygons = view.cast_up::<Polygon>();
    let shapes = view.cast_up::<Shape>();

    assert_eq!(polygons.len(), 2);
    assert_eq!(shapes[1], Shape { sides: 4 });
    assert_eq!(shapes, polygons.cast_up::<Shape>());
    assert_eq!(shapes.as_slice().as_ptr().cast::<u8>(), view.as_slice().as_ptr().cast::<u8>());
}

#[test]
fn cast_up_to_self() {
    let squares = squares();
    let view = ReadOnlyArray::from(&squares);
    assert_eq!(view.cast_up::<Square>(), view);
}

// =============================================================================
// Runtime casts
// =============================================================================

#[test]
fn as_type_restores_the_runtime_type() {
    let squares = squares();
    let shapes = ReadOnlyArray::from(&squares).cast_up::<Shape>();

    let restored = shapes.as_type::<Square>();
    assert!(!restored.is_default());
    assert_eq!(restored[0], Square(Polygon(Shape { sides: 4 })));
    assert_eq!(shapes.as_type::<Polygon>().len(), 2);
}

#[test]
fn as_type_falls_back_to_default() {
    let shapes = Array::from(vec![Shape { sides: 3 }]);
    let view = ReadOnlyArray::from(&shapes);

    assert!(view.as_type::<Polygon>().is_default());
    assert!(view.as_type::<Color>().is_default());
    assert!(ReadOnlyArray::<Shape>::DEFAULT.as_type::<Shape>().is_default());
}

#[test]
fn cast_array_rejects_unrelated_types() {
    let colors = ImmutableArray::from(vec![Color(0xff0000)]);
    let view = ReadOnlyArray::from(&colors);

    assert_eq!(
        view.cast_array::<Shape>(),
        Err(Error::InvalidCast {
            from: std::any::type_name::<Color>(),
            to: std::any::type_name::<Shape>(),
        })
    );
}

#[test]
fn cast_array_error_names_both_types() {
    let colors = Array::from(vec![Color(1)]);
    let message = ReadOnlyArray::from(&colors)
        .cast_array::<Square>()
        .unwrap_err()
        .to_string();
    assert!(message.contains("Color"));
    assert!(message.contains("Square"));
}

#[test]
fn cast_array_accepts_declared_supertypes() {
    let squares = squares();
    let shapes = ReadOnlyArray::from(&squares).cast_array::<Shape>();
    assert_eq!(shapes.map(|view| view.len()), Ok(2));
}

#[test]
fn cast_array_of_default_is_default() {
    let cast = ReadOnlyArray::<Color>::DEFAULT.cast_array::<Shape>();
    assert_eq!(cast, Ok(ReadOnlyArray::DEFAULT));
}

#[test]
fn upcast_views_snapshot_as_the_base_type() {
    let squares = squares();
    let shapes = ReadOnlyArray::from(&squares).cast_up::<Shape>();
    let snapshot = shapes.to_immutable();
    assert_eq!(&*snapshot, &[Shape { sides: 4 }, Shape { sides: 4 }]);
    assert!(snapshot.element_type().is::<Shape>());
    assert!(!snapshot.element_type().is::<Square>());
}

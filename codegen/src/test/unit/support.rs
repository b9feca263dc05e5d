//! Type-support table and operation table tests.

use sigkern_dtype::ElementType;
use strum::VariantArray;
use test_case::test_case;

use crate::{Error, OperationKind, operation_spec, scalar_spelling, supported_types};

#[test]
fn test_every_operation_has_a_row() {
    for op in OperationKind::VARIANTS {
        let spec = operation_spec(*op).expect("operation table must cover every variant");
        assert_eq!(spec.op, *op);
        assert!(!spec.support.is_empty(), "{op} has an empty support set");
        assert!(spec.template.contains(spec.entry_point), "{op} template does not define {}", spec.entry_point);
    }
}

#[test]
fn test_entry_points_are_unique() {
    let mut names: Vec<_> = OperationKind::VARIANTS.iter().map(|op| operation_spec(*op).unwrap().entry_point).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), OperationKind::VARIANTS.len());
}

#[test_case(OperationKind::Correlate)]
#[test_case(OperationKind::Convolve)]
#[test_case(OperationKind::Correlate2d)]
#[test_case(OperationKind::Convolve2d)]
fn test_convolution_family_supports_everything(op: OperationKind) {
    let types: Vec<_> = supported_types(op).unwrap().iter().map(|(ty, _)| *ty).collect();
    assert_eq!(types, ElementType::VARIANTS);
}

#[test_case(OperationKind::Lfilter)]
#[test_case(OperationKind::Lombscargle)]
fn test_real_only(op: OperationKind) {
    let types: Vec<_> = supported_types(op).unwrap().iter().map(|(ty, _)| *ty).collect();
    assert_eq!(types, [ElementType::Float32, ElementType::Float64]);
}

#[test_case(OperationKind::Upfirdn)]
#[test_case(OperationKind::Upfirdn2d)]
fn test_resampling_excludes_integers(op: OperationKind) {
    let support = supported_types(op).unwrap();
    assert_eq!(support.len(), 4);
    assert!(support.iter().all(|(ty, _)| !ty.is_int()));
}

#[test_case(OperationKind::Convolve, ElementType::Int32, "int")]
#[test_case(OperationKind::Convolve, ElementType::Int64, "long int")]
#[test_case(OperationKind::Correlate2d, ElementType::Complex64, "complex<float>")]
#[test_case(OperationKind::Upfirdn, ElementType::Complex128, "complex<double>")]
#[test_case(OperationKind::Lfilter, ElementType::Float32, "float")]
#[test_case(OperationKind::Lombscargle, ElementType::Float64, "double")]
fn test_scalar_spelling(op: OperationKind, dtype: ElementType, expected: &str) {
    assert_eq!(scalar_spelling(op, dtype).unwrap(), expected);
}

#[test]
fn test_every_unsupported_datatype() {
    for &op in OperationKind::VARIANTS {
        let support = supported_types(op).unwrap();
        for &dtype in ElementType::VARIANTS {
            if support.iter().any(|(ty, _)| *ty == dtype) {
                continue;
            }
            let err = scalar_spelling(op, dtype).unwrap_err();
            assert!(matches!(err, Error::UnsupportedDatatype { dtype: d, op: o } if d == dtype && o == op));
            let message = err.to_string();
            assert!(message.contains(dtype.name()), "{message}");
            assert!(message.contains(op.name()), "{message}");
        }
    }
}

#[test_case("lfilter", OperationKind::Lfilter)]
#[test_case("LFILTER", OperationKind::Lfilter)]
#[test_case("Convolve2D", OperationKind::Convolve2d)]
#[test_case("upfirdn2d", OperationKind::Upfirdn2d)]
#[test_case("LombScargle", OperationKind::Lombscargle)]
fn test_parse_name(name: &str, expected: OperationKind) {
    assert_eq!(OperationKind::parse_name(name).unwrap(), expected);
}

#[test]
fn test_parse_invalid_name() {
    let err = OperationKind::parse_name("lfiltr").unwrap_err();
    assert!(matches!(&err, Error::InvalidOperationName { name } if name == "lfiltr"));
}

#[test]
fn test_names_roundtrip() {
    for op in OperationKind::VARIANTS {
        assert_eq!(OperationKind::parse_name(op.name()).unwrap(), *op);
    }
}

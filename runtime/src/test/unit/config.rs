use test_case::test_case;

use crate::{Backend, Error, FAST_MATH_FLAG, LANGUAGE_STANDARD_FLAG, RuntimeConfig};

#[test_case("host", Backend::Host ; "host")]
#[test_case("HOST", Backend::Host ; "host upper")]
#[test_case("cuda", Backend::Cuda { device_id: 0 } ; "cuda default device")]
#[test_case("cuda:3", Backend::Cuda { device_id: 3 } ; "cuda explicit device")]
fn test_backend_parse(input: &str, expected: Backend) {
    assert_eq!(input.parse::<Backend>().unwrap(), expected);
}

#[test_case("gpu" ; "unknown backend")]
#[test_case("cuda:x" ; "bad device id")]
#[test_case("host:1" ; "host with device")]
fn test_backend_parse_rejects(input: &str) {
    assert!(matches!(input.parse::<Backend>(), Err(Error::Config { .. })));
}

#[test]
fn test_builder_defaults_match_default() {
    assert_eq!(RuntimeConfig::builder().build(), RuntimeConfig::default());
}

#[test]
fn test_builder_overrides() {
    let config = RuntimeConfig::builder()
        .backend(Backend::Cuda { device_id: 1 })
        .include_paths(vec!["/opt/cupy/include".to_string()])
        .complex_header("#include <thrust/complex.h>")
        .build();

    assert_eq!(config.backend, Backend::Cuda { device_id: 1 });
    assert_eq!(config.complex_header, "#include <thrust/complex.h>");
    assert_eq!(config.include_paths, ["/opt/cupy/include"]);
}

#[test]
fn test_compile_options_carry_fixed_flags_and_includes() {
    let config = RuntimeConfig::builder().include_paths(vec!["/a".to_string(), "/b".to_string()]).build();
    let options = config.compile_options();

    assert_eq!(options.flags, [LANGUAGE_STANDARD_FLAG, FAST_MATH_FLAG]);
    assert_eq!(options.include_paths, ["/a", "/b"]);
}

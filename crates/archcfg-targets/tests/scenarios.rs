//! End-to-end resolution scenarios for LoongArch triples.

use archcfg_core::{DiagKey, OptionSet, Severity};
use archcfg_targets::loongarch::{LoongArchAbi, FLOAT_OPTIONS};
use archcfg_targets::{parse_triple, resolve_target, Arch, Environment, TargetResolution, Triple};

const ENVIRONMENTS: [Environment; 6] = [
    Environment::Gnu,
    Environment::GnuSf,
    Environment::GnuF32,
    Environment::GnuF64,
    Environment::Musl,
    Environment::Unknown,
];

fn resolve(triple: &str, args: &[&str]) -> TargetResolution {
    let triple = parse_triple(triple).unwrap();
    let options = OptionSet::parse(args).unwrap();
    resolve_target(&triple, &options).unwrap()
}

fn all_triples() -> Vec<Triple> {
    let mut triples = Vec::new();
    for arch in [Arch::LoongArch32, Arch::LoongArch64] {
        for env in ENVIRONMENTS {
            triples.push(Triple::linux(arch, env));
        }
    }
    triples
}

#[test]
fn generic_la64_without_options() {
    let res = resolve("loongarch64-unknown-linux-gnu", &[]);
    assert_eq!(res.abi.as_str(), "lp64d");
    assert_eq!(res.features.to_strings(), vec!["+64bit", "+f", "+d", "+ual"]);
    assert!(res.diagnostics.is_empty());
}

#[test]
fn soft_float_la32_without_options() {
    let res = resolve("loongarch32-unknown-linux-gnusf", &[]);
    assert_eq!(res.abi.as_str(), "ilp32s");
    assert!(res.features.is_empty());
}

#[test]
fn double_float_overrides_explicit_abi() {
    let res = resolve("loongarch32-unknown-linux-gnu", &["-mdouble-float", "-mabi=ilp32s"]);
    assert_eq!(res.abi.as_str(), "ilp32d");
    assert_eq!(res.diagnostics.len(), 1);
    let d = res.diagnostics.iter().next().unwrap();
    assert_eq!(d.severity, Severity::Warning);
    assert_eq!(d.args, vec!["-mabi=ilp32s", "-mdouble-float", "ilp32d"]);
}

#[test]
fn fpu_zero_disables_float_after_profile() {
    let res = resolve("loongarch64-unknown-linux-gnu", &["-mfpu=0"]);
    assert_eq!(
        res.features.to_strings(),
        vec!["+64bit", "+f", "+d", "+ual", "-f", "-d"]
    );
    assert_eq!(res.abi.as_str(), "lp64s");
}

#[test]
fn bogus_arch_name() {
    let res = resolve("loongarch64-unknown-linux-gnu", &["-march=bogus"]);
    assert!(res.features.is_empty());
    let errors: Vec<_> = res.diagnostics.iter().filter(|d| d.is_error()).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].key, DiagKey::InvalidArchName);
}

#[test]
fn unaligned_access_appends_trailing_toggle() {
    for args in [
        vec!["-munaligned-access"],
        vec!["-munaligned-access", "-msoft-float"],
        vec!["-munaligned-access", "-mfpu=32", "-march=la464"],
    ] {
        let res = resolve("loongarch64-unknown-linux-gnu", &args);
        assert_eq!(res.features.to_strings().last().map(String::as_str), Some("+ual"));
    }
}

#[test]
fn float_option_always_decides_suffix() {
    let extras: [&[&str]; 4] = [
        &[],
        &["-mabi=lp64d"],
        &["-mfpu=64", "-mabi=ilp32s"],
        &["-mfpu=none"],
    ];
    for triple in all_triples() {
        for float in FLOAT_OPTIONS {
            for extra in extras {
                let mut words: Vec<&str> = extra.to_vec();
                words.push(float.spelling());
                let options = OptionSet::parse(&words).unwrap();
                let res = resolve_target(&triple, &options).unwrap();
                let abi = res.abi.canonical().unwrap();
                assert_eq!(abi.word_width(), triple.word_width());
                let expected = archcfg_targets::loongarch::FloatAbi::from_option(float).unwrap();
                assert_eq!(abi.float_abi(), expected, "{triple} {words:?}");
            }
        }
    }
}

#[test]
fn fpu_width_decides_suffix_without_higher_sources() {
    for triple in all_triples() {
        for (width, suffix) in [("64", "d"), ("32", "f"), ("0", "s")] {
            let arg = format!("-mfpu={width}");
            let res = resolve_target(&triple, &OptionSet::parse([arg.as_str()]).unwrap()).unwrap();
            let prefix = match triple.arch {
                Arch::LoongArch32 => "ilp32",
                _ => "lp64",
            };
            assert_eq!(res.abi.as_str(), format!("{prefix}{suffix}"));
        }
    }
}

#[test]
fn environment_defaults() {
    for triple in all_triples() {
        let res = resolve_target(&triple, &OptionSet::new()).unwrap();
        let expected = match triple.environment {
            Environment::GnuSf => "s",
            Environment::GnuF32 => "f",
            _ => "d",
        };
        let abi: LoongArchAbi = res.abi.canonical().unwrap();
        assert_eq!(abi.float_abi().suffix(), expected, "{triple}");
    }
}

#[test]
fn feature_order_is_profile_float_alignment() {
    let res = resolve(
        "loongarch64-unknown-linux-gnu",
        &["-mstrict-align", "-msingle-float", "-march=la464"],
    );
    assert_eq!(
        res.features.to_strings(),
        vec!["+64bit", "+f", "+d", "+lsx", "+lasx", "+ual", "+f", "-d", "-ual"]
    );
}

#[test]
fn resolution_is_idempotent() {
    let args = ["-march=la464", "-mfpu=16", "-mabi=lp64s", "-msingle-float", "-mstrict-align"];
    let first = resolve("loongarch64-unknown-linux-gnuf64", &args);
    let second = resolve("loongarch64-unknown-linux-gnuf64", &args);
    assert_eq!(first, second);
}

#[test]
fn concurrent_jobs_share_the_profile_table() {
    let triple = parse_triple("loongarch64-unknown-linux-gnu").unwrap();
    let expected = resolve_target(&triple, &OptionSet::parse(["-march=la464"]).unwrap()).unwrap();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                s.spawn(|| {
                    let options = OptionSet::parse(["-march=la464"]).unwrap();
                    resolve_target(&triple, &options).unwrap()
                })
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}

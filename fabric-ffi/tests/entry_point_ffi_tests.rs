mod common;

use common::{any_duration, any_text, roundtrip};
use fabric_description::{
    CodePackageEntryPointDescription, ContainerHostEntryPointDescription,
    DllHostEntryPointDescription, DllHostHostedDllDescription, DllHostIsolationPolicy,
    ExeHostEntryPointDescription, ExeHostWorkingFolder, Validate,
};
use fabric_ffi::raw::*;
use fabric_ffi::{FromNative, PinCollection, ToNative};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::ptr;
use std::time::Duration;

// ── Exe host ──────────────────────────────────────────────────────

#[test]
fn none_entry_point_has_null_value() {
    let mut pin = PinCollection::new();
    let native = CodePackageEntryPointDescription::None.to_native(&mut pin);
    assert_eq!(native.Kind, FABRIC_CODE_PACKAGE_ENTRY_POINT_KIND_NONE);
    assert!(native.Value.is_null());
    assert_eq!(
        roundtrip(&CodePackageEntryPointDescription::None),
        CodePackageEntryPointDescription::None
    );
}

#[test]
fn plain_exe_host_is_base_only() {
    let exe = ExeHostEntryPointDescription::new("Cart.exe");
    let mut pin = PinCollection::new();
    let native = exe.to_native(&mut pin);
    assert!(native.Reserved.is_null());
    assert!(native.Arguments.is_null());
    assert_eq!(native.WorkingFolder, FABRIC_EXEHOST_WORKING_FOLDER_WORK);
}

#[test]
fn external_executable_allocates_both_levels() {
    let mut exe = ExeHostEntryPointDescription::new("cart");
    exe.is_external_executable = true;
    let mut pin = PinCollection::new();
    let native = exe.to_native(&mut pin);

    let ex1 = unsafe { &*native.Reserved.cast::<FABRIC_EXEHOST_ENTRY_POINT_DESCRIPTION_EX1>() };
    assert_eq!(ex1.PeriodicIntervalInSeconds, 0);
    let ex2 = unsafe { &*ex1.Reserved.cast::<FABRIC_EXEHOST_ENTRY_POINT_DESCRIPTION_EX2>() };
    assert_eq!(ex2.IsExternalExecutable, TRUE);
}

#[test]
fn sub_second_interval_never_reaches_native() {
    let mut exe = ExeHostEntryPointDescription::new("Setup.exe");
    exe.periodic_interval = Duration::from_millis(1500);
    let err = exe.validate().unwrap_err();
    assert_eq!(err.field(), Some("periodic_interval"));

    exe.periodic_interval = Duration::from_secs(2);
    exe.validate().unwrap();
    assert_eq!(roundtrip(&exe), exe);
}

#[test]
fn embedded_nul_never_reaches_native() {
    let mut exe = ExeHostEntryPointDescription::new("Setup.exe");
    exe.arguments = Some("--mode\0fast".into());
    assert_eq!(exe.validate().unwrap_err().field(), Some("arguments"));

    exe.arguments = Some("--mode fast".into());
    exe.validate().unwrap();
    assert_eq!(roundtrip(&exe), exe);
}

// ── Every kind ────────────────────────────────────────────────────

#[test]
fn every_entry_point_kind_roundtrips() {
    let mut exe = ExeHostEntryPointDescription::new("Cart.exe");
    exe.arguments = Some("--port 80".into());
    exe.working_folder = ExeHostWorkingFolder::CodeBase;
    exe.periodic_interval = Duration::from_secs(3600);
    exe.console_redirection_enabled = true;
    exe.console_redirection_file_retention_count = 5;
    exe.console_redirection_file_max_size_in_kb = 2048;

    let entry_points = [
        CodePackageEntryPointDescription::ExeHost(exe),
        CodePackageEntryPointDescription::DllHost(DllHostEntryPointDescription {
            isolation_policy: DllHostIsolationPolicy::DedicatedProcess,
            hosted_dlls: vec![
                DllHostHostedDllDescription::Unmanaged {
                    dll_name: "cart.dll".into(),
                },
                DllHostHostedDllDescription::Managed {
                    assembly_name: "Cart.Service".into(),
                },
            ],
        }),
        CodePackageEntryPointDescription::DllHost(DllHostEntryPointDescription::default()),
        CodePackageEntryPointDescription::ContainerHost(ContainerHostEntryPointDescription {
            image_name: "shop/cart:2".into(),
            commands: Some("run,--fast".into()),
            entry_point: None,
        }),
    ];
    for entry_point in &entry_points {
        assert!(entry_point.validate().is_ok());
        assert_eq!(&roundtrip(entry_point), entry_point);
    }
}

#[test]
#[should_panic(expected = "native ABI mismatch")]
fn invalid_entry_point_kind_is_fatal() {
    let native = FABRIC_CODE_PACKAGE_ENTRY_POINT {
        Kind: FABRIC_CODE_PACKAGE_ENTRY_POINT_KIND_INVALID,
        Value: ptr::null_mut(),
        Reserved: ptr::null_mut(),
    };
    let _ = unsafe { CodePackageEntryPointDescription::from_native(&native) };
}

#[test]
#[should_panic(expected = "native ABI mismatch")]
fn unknown_hosted_dll_kind_is_fatal() {
    let native = FABRIC_DLLHOST_HOSTED_DLL_DESCRIPTION {
        Kind: 3,
        Value: ptr::null_mut(),
    };
    let _ = unsafe { DllHostHostedDllDescription::from_native(&native) };
}

// ── Properties ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn validated_exe_hosts_roundtrip_exactly(
        program in any_text(),
        arguments in proptest::option::of(any_text()),
        periodic_interval in any_duration(),
        retention in any::<u32>(),
        external in any::<bool>(),
    ) {
        let mut exe = ExeHostEntryPointDescription::new(program);
        exe.arguments = arguments;
        exe.periodic_interval = periodic_interval;
        exe.console_redirection_file_retention_count = retention;
        exe.is_external_executable = external;
        match exe.validate() {
            Ok(()) => prop_assert_eq!(roundtrip(&exe), exe),
            Err(err) => prop_assert!(matches!(
                err.field(),
                Some("program" | "arguments" | "periodic_interval")
            )),
        }
    }

    #[test]
    fn validated_containers_roundtrip_exactly(
        image_name in any_text(),
        commands in proptest::option::of(any_text()),
        entry_point in proptest::option::of(any_text()),
    ) {
        let container = ContainerHostEntryPointDescription { image_name, commands, entry_point };
        match container.validate() {
            Ok(()) => prop_assert_eq!(roundtrip(&container), container),
            Err(err) => prop_assert!(matches!(
                err.field(),
                Some("image_name" | "commands" | "entry_point")
            )),
        }
    }
}

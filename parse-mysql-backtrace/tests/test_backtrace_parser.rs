use parse_mysql_backtrace::domain::{BacktraceError, SystemVersion};
use parse_mysql_backtrace::driver::BacktraceParser;
use parse_mysql_backtrace::symbolization::ExternalTool;
use std::cell::RefCell;
use std::fs::{self, File};

/// Canned binutils: echoing c++filt, a fixed nm table, addr2line printing its arguments
struct FakeBinutils {
    calls: RefCell<Vec<String>>,
}

impl FakeBinutils {
    fn new() -> Self {
        Self { calls: RefCell::new(Vec::new()) }
    }
}

impl ExternalTool for FakeBinutils {
    fn run(&self, program: &str, _args: &[&str]) -> Result<(), BacktraceError> {
        panic!("resolution must not run {program}");
    }

    fn capture(&self, program: &str, args: &[&str]) -> Result<String, BacktraceError> {
        self.calls.borrow_mut().push(format!("{program} {}", args.join(" ")));
        Ok(match program {
            "c++filt" => match args[0] {
                "_ZN10ha_mroonga5writeEPh" => "ha_mroonga::write(unsigned char*)\n".to_string(),
                other => format!("{other}\n"),
            },
            "nm" => "\
0000000000001000 T grn_ctx_init
0000000000004000 T ha_mroonga::write(unsigned char const*)
0000000000005000 r ha_mroonga::write(unsigned char*)::__FUNCTION__
"
            .to_string(),
            "addr2line" => format!("{} {}\n", args[0], args[1]),
            _ => panic!("unexpected program {program}"),
        })
    }
}

const CRASH_LOG: &str = "\
2020-10-10T09:00:00.000000Z 8 [ERROR] [MY-000000] mysqld got signal 11 ;
Thread pointer: 0x7f0000000000
stack_bottom = 7f0000010000 thread_stack 0x46000
/usr/sbin/mysqld(my_print_stacktrace(unsigned char const*, unsigned long)+0x2e)[0x55d000001000]
/usr/sbin/mysqld(+0x500)[0x55d000002000]
/lib64/libpthread.so.0(+0xf630)[0x7f0000f630]
/usr/lib64/mysql/plugin/ha_mroonga.so(_ZN10ha_mroonga5writeEPh+0x12)[0x7f0000004012]
/usr/lib64/libgroonga.so.0(grn_ctx_init+0x20) [0x7f0000001020]
The manual page at http://dev.mysql.com/doc/mysql/en/crashing.html contains
";

#[test]
fn test_full_crash_log() {
    let debug_root = tempfile::tempdir().expect("Failed to create debug root");
    let lib64 = debug_root.path().join("usr/lib64");
    fs::create_dir_all(&lib64).unwrap();
    File::create(lib64.join("libgroonga.so.0.0.0-10.0.9-1.el7.x86_64.debug")).unwrap();
    let groonga_debug = lib64.join("libgroonga.so.0.0.0-10.0.9-1.el7.x86_64.debug");

    let tool = FakeBinutils::new();
    let system = SystemVersion::new("centos", "7");
    let parser = BacktraceParser::new(&tool, &system).with_debug_root(debug_root.path());

    let mut out = Vec::new();
    let stats = parser.process(CRASH_LOG.as_bytes(), &mut out).expect("Failed to resolve log");
    let out = String::from_utf8(out).expect("Invalid UTF-8");

    let expected = format!(
        "\
/usr/sbin/mysqld(my_print_stacktrace(unsigned char const*, unsigned long)+0x2e)[0x55d000001000]
--exe=/usr/sbin/mysqld 0x55d000001000
/usr/sbin/mysqld(+0x500)[0x55d000002000]
--exe=/usr/sbin/mysqld 0x55d000002000
/lib64/libpthread.so.0(+0xf630)[0x7f0000f630]
/usr/lib64/mysql/plugin/ha_mroonga.so(_ZN10ha_mroonga5writeEPh+0x12)[0x7f0000004012]
--exe=/usr/lib64/mysql/plugin/ha_mroonga.so 0x4012
/usr/lib64/libgroonga.so.0(grn_ctx_init+0x20) [0x7f0000001020]
--exe={} 0x1020
",
        groonga_debug.display()
    );
    assert_eq!(out, expected);

    assert_eq!(stats.lines, 9);
    assert_eq!(stats.frames, 5);
    assert_eq!(stats.resolved, 4);

    let calls = tool.calls.borrow();
    assert!(calls.contains(&format!("nm --demangle {}", groonga_debug.display())));
    assert!(calls.contains(&"c++filt _ZN10ha_mroonga5writeEPh".to_string()));
}

#[test]
fn test_invalid_utf8_does_not_abort() {
    let tool = FakeBinutils::new();
    let system = SystemVersion::new("amazon", "2");
    let debug_root = tempfile::tempdir().unwrap();
    let parser = BacktraceParser::new(&tool, &system).with_debug_root(debug_root.path());

    let mut input = b"/usr/sbin/mysqld(\xe3\x81+0x1)[0x1]\n".to_vec();
    input.extend_from_slice(b"/usr/sbin/mysqld(+0x2)[0x2]\n");

    let mut out = Vec::new();
    let stats = parser.process(input.as_slice(), &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "/usr/sbin/mysqld(+0x2)[0x2]\n--exe=/usr/sbin/mysqld 0x2\n"
    );
    assert_eq!(stats.undecodable, 1);
}

#[test]
fn test_unresolved_symbol_is_fatal() {
    let tool = FakeBinutils::new();
    let system = SystemVersion::new("centos", "7");
    let debug_root = tempfile::tempdir().unwrap();
    let parser = BacktraceParser::new(&tool, &system).with_debug_root(debug_root.path());

    let input =
        "/usr/lib64/libgroonga.so.0(grn_unknown+0x20)[0x1]\n/usr/sbin/mysqld(+0x2)[0x2]\n";
    let mut out = Vec::new();
    let err = parser.process(input.as_bytes(), &mut out).unwrap_err();

    assert_eq!(
        err.to_string(),
        "can't resolve relative address: grn_unknown+0x20: grn_unknown: 0x20: \
         /usr/lib64/libgroonga.so.0"
    );
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "/usr/lib64/libgroonga.so.0(grn_unknown+0x20)[0x1]\n"
    );
}

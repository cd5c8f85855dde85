/// Minimal diagnostic: tries to load the embedded XDP object and find the
/// program and ring buffer the detector needs.
/// Run with: sudo -E cargo run -p scanwatch --features ebpf --bin bpf_check
use scanwatch::probe::{EVENTS_MAP, PROGRAM_NAME, XDP_BPF_BYTES};

fn main() {
    println!("Testing scanwatch BPF object with aya...");

    let ebpf = match aya::Ebpf::load(XDP_BPF_BYTES) {
        Ok(ebpf) => ebpf,
        Err(e) => {
            println!("FAILED: {e:#?}");
            println!();
            println!("Check: sudo cat /proc/sys/kernel/unprivileged_bpf_disabled");
            println!("Check: sudo dmesg | grep -i bpf | tail -5");
            std::process::exit(1);
        }
    };

    let program = ebpf.program(PROGRAM_NAME).is_some();
    let ring = ebpf.map(EVENTS_MAP).is_some();
    println!("program '{PROGRAM_NAME}': {}", if program { "found" } else { "MISSING" });
    println!("map '{EVENTS_MAP}': {}", if ring { "found" } else { "MISSING" });

    if program && ring {
        println!("SUCCESS: BPF ELF loaded and all maps created OK");
    } else {
        std::process::exit(1);
    }
}

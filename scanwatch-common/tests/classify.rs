use scanwatch_common::{classify, tcp_flag_bits as bits, FlagVector, Signature};

fn all_vectors() -> impl Iterator<Item = FlagVector> {
    (0u8..=255).map(FlagVector::from_bits)
}

#[test]
fn every_flag_byte_is_classified_deterministically() {
    for flags in all_vectors() {
        let first = classify(flags);
        for _ in 0..3 {
            assert_eq!(classify(flags), first, "flags {:#010b}", flags.bits());
        }
    }
}

#[test]
fn exactly_five_flag_bytes_match_a_signature() {
    let matched: Vec<(u8, Signature)> = all_vectors()
        .filter_map(|f| classify(f).map(|sig| (f.bits(), sig)))
        .collect();
    assert_eq!(
        matched,
        vec![
            (0, Signature::Null),
            (bits::FIN, Signature::Fin),
            (bits::SYN, Signature::Syn),
            (bits::ACK, Signature::Ack),
            (bits::FIN | bits::PSH | bits::URG, Signature::Xmas),
        ]
    );
}

#[test]
fn syn_matches_only_a_lone_syn() {
    for flags in all_vectors() {
        let lone_syn = flags.bits() == bits::SYN;
        assert_eq!(classify(flags) == Some(Signature::Syn), lone_syn);
    }
}

#[test]
fn fin_matches_only_a_lone_fin() {
    for flags in all_vectors() {
        let lone_fin = flags.bits() == bits::FIN;
        assert_eq!(classify(flags) == Some(Signature::Fin), lone_fin);
    }
}

#[test]
fn ack_matches_only_a_lone_ack() {
    for flags in all_vectors() {
        let lone_ack = flags.bits() == bits::ACK;
        assert_eq!(classify(flags) == Some(Signature::Ack), lone_ack);
    }
}

#[test]
fn null_matches_only_an_empty_vector() {
    for flags in all_vectors() {
        assert_eq!(classify(flags) == Some(Signature::Null), flags.bits() == 0);
    }
}

#[test]
fn xmas_needs_fin_psh_urg_and_nothing_else() {
    for flags in all_vectors() {
        let xmas = flags.fin()
            && flags.psh()
            && flags.urg()
            && !flags.syn()
            && !flags.ack()
            && !flags.rst()
            && !flags.ece()
            && !flags.cwr();
        assert_eq!(classify(flags) == Some(Signature::Xmas), xmas);
    }
}

#[test]
fn two_primary_bits_never_classify() {
    for flags in all_vectors() {
        let primaries = [flags.syn(), flags.fin(), flags.ack()]
            .into_iter()
            .filter(|set| *set)
            .count();
        if primaries >= 2 {
            assert_eq!(classify(flags), None, "flags {:#010b}", flags.bits());
        }
    }
}

#[test]
fn handshake_and_ecn_variants_are_not_scans() {
    let syn = FlagVector::EMPTY.with_syn(true);
    assert_eq!(classify(syn.with_ack(true)), None);
    assert_eq!(classify(syn.with_ece(true).with_cwr(true)), None);
    assert_eq!(classify(FlagVector::EMPTY.with_rst(true)), None);
    assert_eq!(classify(FlagVector::EMPTY.with_ack(true).with_psh(true)), None);
    assert_eq!(
        classify(
            FlagVector::EMPTY
                .with_fin(true)
                .with_psh(true)
                .with_urg(true)
                .with_ack(true)
        ),
        None
    );
}

#[test]
fn labels_match_log_contract() {
    let labels: Vec<String> = Signature::ALL.iter().map(|s| s.to_string()).collect();
    assert_eq!(labels, ["NULL", "XMAS", "SYN", "FIN", "ACK"]);
}

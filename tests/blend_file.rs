use blendfile::{BlendFile, Value};

fn code4(code: &str) -> [u8; 4] {
    let mut out = [0u8; 4];
    out[..code.len()].copy_from_slice(code.as_bytes());
    out
}

fn block(code: &str, old_address: u64, sdna_index: u32, count: u32, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&code4(code));
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(&old_address.to_le_bytes());
    out.extend_from_slice(&sdna_index.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());
    out.extend_from_slice(payload);
    out
}

fn string_pool(strings: &[&str]) -> Vec<u8> {
    let mut out = Vec::new();
    for s in strings {
        out.extend_from_slice(s.as_bytes());
        out.push(0);
    }
    out
}

/// Builds a complete, minimal but structurally faithful file:
///
/// - `ID { int code; }`
/// - `Base { *ID from; }`
/// - `Many { *ID items; }`
/// - `Ob { char name[8]; *ID link; }`
fn build_file() -> Vec<u8> {
    let mut dna_payload = Vec::new();
    dna_payload.extend_from_slice(b"SDNA");
    dna_payload.extend_from_slice(b"NAME");
    let names = ["code", "*from", "*items", "name[8]", "*link"];
    dna_payload.extend_from_slice(&(names.len() as u32).to_le_bytes());
    dna_payload.extend_from_slice(&string_pool(&names));

    dna_payload.extend_from_slice(b"TYPE");
    let types = ["int", "char", "ID", "Base", "Many", "Ob"];
    dna_payload.extend_from_slice(&(types.len() as u32).to_le_bytes());
    dna_payload.extend_from_slice(&string_pool(&types));

    dna_payload.extend_from_slice(b"TLEN");
    let type_sizes: [u16; 6] = [4, 1, 4, 8, 8, 16];
    for size in type_sizes {
        dna_payload.extend_from_slice(&size.to_le_bytes());
    }

    dna_payload.extend_from_slice(b"STRC");
    dna_payload.extend_from_slice(&4u32.to_le_bytes());
    // ID { int code; }  -- type_index=2
    dna_payload.extend_from_slice(&2u16.to_le_bytes());
    dna_payload.extend_from_slice(&1u16.to_le_bytes());
    dna_payload.extend_from_slice(&0u16.to_le_bytes()); // int
    dna_payload.extend_from_slice(&0u16.to_le_bytes()); // "code"
    // Base { *ID from; } -- type_index=3
    dna_payload.extend_from_slice(&3u16.to_le_bytes());
    dna_payload.extend_from_slice(&1u16.to_le_bytes());
    dna_payload.extend_from_slice(&2u16.to_le_bytes()); // ID
    dna_payload.extend_from_slice(&1u16.to_le_bytes()); // "*from"
    // Many { *ID items; } -- type_index=4
    dna_payload.extend_from_slice(&4u16.to_le_bytes());
    dna_payload.extend_from_slice(&1u16.to_le_bytes());
    dna_payload.extend_from_slice(&2u16.to_le_bytes()); // ID
    dna_payload.extend_from_slice(&2u16.to_le_bytes()); // "*items"
    // Ob { char name[8]; *ID link; } -- type_index=5
    dna_payload.extend_from_slice(&5u16.to_le_bytes());
    dna_payload.extend_from_slice(&2u16.to_le_bytes());
    dna_payload.extend_from_slice(&1u16.to_le_bytes()); // char
    dna_payload.extend_from_slice(&3u16.to_le_bytes()); // "name[8]"
    dna_payload.extend_from_slice(&2u16.to_le_bytes()); // ID
    dna_payload.extend_from_slice(&4u16.to_le_bytes()); // "*link"

    let mut data = Vec::new();
    data.extend_from_slice(b"BLENDER-v279");
    data.extend_from_slice(&block("DNA1", 0, 0, 0, &dna_payload));

    let mut single_id = Vec::new();
    single_id.extend_from_slice(&42u32.to_le_bytes());
    data.extend_from_slice(&block("ID", 0x1000, 0, 1, &single_id));

    let mut many_id = Vec::new();
    for i in 0..4u32 {
        many_id.extend_from_slice(&i.to_le_bytes());
    }
    data.extend_from_slice(&block("ID", 0x2000, 0, 4, &many_id));

    let mut base_payload = Vec::new();
    base_payload.extend_from_slice(&0x1000u64.to_le_bytes());
    data.extend_from_slice(&block("BASE", 0x3000, 1, 1, &base_payload));

    let mut many_payload = Vec::new();
    many_payload.extend_from_slice(&0x2000u64.to_le_bytes());
    data.extend_from_slice(&block("MANY", 0x4000, 2, 1, &many_payload));

    let mut ob_payload = Vec::new();
    ob_payload.extend_from_slice(b"Cube\0\0\0\0");
    ob_payload.extend_from_slice(&0u64.to_le_bytes());
    data.extend_from_slice(&block("OB", 0x5000, 3, 1, &ob_payload));

    data.extend_from_slice(&block("ENDB", 0, 0, 0, &[]));
    data
}

#[test]
fn opens_and_decodes_header() {
    let data = build_file();
    let file = BlendFile::from_bytes(&data).unwrap();
    assert_eq!(file.header().pointer_width, 8);
    assert_eq!(file.header().version_str(), "279");
}

#[test]
fn resolves_single_instance_pointer() {
    let data = build_file();
    let file = BlendFile::from_bytes(&data).unwrap();
    let base = file.objects_of_type("Base").next().unwrap();
    let target = match base.get("from") {
        Some(Value::Reference(r)) => file.resolve(*r).unwrap(),
        other => panic!("expected Reference, got {other:?}"),
    };
    assert!(matches!(target.get("code"), Some(Value::UInt(42))));
}

#[test]
fn resolves_list_pointer() {
    let data = build_file();
    let file = BlendFile::from_bytes(&data).unwrap();
    let many = file.objects_of_type("Many").next().unwrap();
    match many.get("items") {
        Some(Value::ReferenceList(refs)) => assert_eq!(refs.len(), 4),
        other => panic!("expected ReferenceList, got {other:?}"),
    }
}

#[test]
fn decodes_char_array_and_null_pointer() {
    let data = build_file();
    let file = BlendFile::from_bytes(&data).unwrap();
    let ob = file.objects_of_type("Ob").next().unwrap();
    assert!(matches!(ob.get("name"), Some(Value::Str(s)) if s == "Cube"));
    assert!(matches!(ob.get("link"), Some(Value::Null)));
}

#[test]
fn all_objects_matches_sum_of_objects_of_type() {
    let data = build_file();
    let file = BlendFile::from_bytes(&data).unwrap();
    let total = file.all_objects().count();
    let by_type: usize = ["ID", "Base", "Many", "Ob"]
        .iter()
        .map(|t| file.objects_of_type(t).count())
        .sum();
    assert_eq!(total, by_type);
}

#[test]
fn render_doc_is_pure_and_development_mode_adds_block_index() {
    let data = build_file();
    let file = BlendFile::from_bytes(&data).unwrap();
    let doc = file.render_doc(false);
    assert!(doc.contains("Base"));
    assert!(!doc.contains("Block index"));
    let dev_doc = file.render_doc(true);
    assert!(dev_doc.contains("Block index"));
    assert_eq!(file.render_doc(false), doc);
}

#[test]
fn rejects_truncated_input() {
    let mut data = build_file();
    // Cuts into the final data block's declared payload, not just the
    // trailing ENDB sentinel (which the indexer tolerates being absent).
    let new_len = data.len() - 29;
    data.truncate(new_len);
    assert!(BlendFile::from_bytes(&data).is_err());
}

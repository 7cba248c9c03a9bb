use brickwork::{FieldDescriptor, FieldNames, FieldType, ParamValue, ParameterEntry, ParameterSet, Table};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // Two 8-bit counters packed into one word, a name and a scale per record.
    let mut table = Table::new(
        vec![
            FieldDescriptor::new(0x1001, 0x0000_00FF, 0, 0, FieldType::Int),
            FieldDescriptor::new(0x1002, 0x0000_FF00, 0, 8, FieldType::Int),
            FieldDescriptor::new(0x1003, 0, 4, 0, FieldType::Str),
            FieldDescriptor::new(0x1004, 0, 36, 0, FieldType::Flt),
        ],
        40,
    );
    table.push_row(vec![3u32.into(), 7u32.into(), "kinopio".into(), 1.5f32.into()])?;
    table.push_row(vec![9u32.into(), 1u32.into(), "pinna".into(), 0.25f32.into()])?;

    let names: FieldNames = [(0x1001, "lives"), (0x1002, "coins"), (0x1003, "actor"), (0x1004, "scale")]
        .into_iter()
        .collect();
    table.apply_name_mapping(&names);

    let encoded = table.encode()?;
    let decoded = Table::decode(encoded.clone())?;
    tracing::info!("table: {} bytes, {} rows, coins[1] = {:?}", encoded.len(), decoded.len(), decoded.value(1, 0x1002));

    let params: ParameterSet = [
        ParameterEntry::new(1, "hp", ParamValue::Short(100))?,
        ParameterEntry::new(2, "speed", ParamValue::number_from_f32(2.5))?,
    ]
    .into_iter()
    .collect();
    let encoded = params.encode()?;
    let decoded = ParameterSet::decode(&encoded)?;
    tracing::info!("params: {} bytes, speed = {:?}", encoded.len(), decoded.get_entry("speed")?.value.as_f32());

    Ok(())
}

use brickwork_core::{primitive, text};
use brickwork_core::{BrickError, Result};
use bytes::BytesMut;

/// Parameter type tag. The tag is also the payload size in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ParamType {
    Byte = 1,
    Short = 2,
    Number = 4,
    Vector = 12,
    Color = 16,
}

impl ParamType {
    #[inline]
    pub fn tag(self) -> u32 {
        self as u32
    }

    #[inline]
    pub fn size(self) -> usize {
        self as usize
    }
}

impl TryFrom<u32> for ParamType {
    type Error = u32;

    fn try_from(tag: u32) -> std::result::Result<Self, u32> {
        match tag {
            1 => Ok(ParamType::Byte),
            2 => Ok(ParamType::Short),
            4 => Ok(ParamType::Number),
            12 => Ok(ParamType::Vector),
            16 => Ok(ParamType::Color),
            other => Err(other),
        }
    }
}

/// Three floats: positions, scales, directions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Four 32-bit channels, stored verbatim. Red, green, blue, alpha by
/// convention only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color4 {
    pub r: u32,
    pub g: u32,
    pub b: u32,
    pub a: u32,
}

/// Payload of a parameter entry.
///
/// `Byte` and `Number` stay raw: the format does not say whether four bytes
/// are an integer or a float, so the caller picks a reading with the `as_*`
/// helpers.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Byte([u8; 1]),
    Short(u16),
    Number([u8; 4]),
    Vector(Vector3),
    Color(Color4),
}

impl ParamValue {
    pub fn param_type(&self) -> ParamType {
        match self {
            ParamValue::Byte(_) => ParamType::Byte,
            ParamValue::Short(_) => ParamType::Short,
            ParamValue::Number(_) => ParamType::Number,
            ParamValue::Vector(_) => ParamType::Vector,
            ParamValue::Color(_) => ParamType::Color,
        }
    }

    pub fn byte(value: u8) -> Self {
        ParamValue::Byte([value])
    }

    pub fn number_from_u32(value: u32) -> Self {
        ParamValue::Number(value.to_be_bytes())
    }

    pub fn number_from_i32(value: i32) -> Self {
        ParamValue::Number(value.to_be_bytes())
    }

    pub fn number_from_f32(value: f32) -> Self {
        ParamValue::Number(value.to_be_bytes())
    }

    pub fn as_u8(&self) -> Option<u8> {
        match self {
            ParamValue::Byte([b]) => Some(*b),
            _ => None,
        }
    }

    pub fn as_u16(&self) -> Option<u16> {
        match self {
            ParamValue::Short(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            ParamValue::Number(raw) => Some(u32::from_be_bytes(*raw)),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            ParamValue::Number(raw) => Some(i32::from_be_bytes(*raw)),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            ParamValue::Number(raw) => Some(f32::from_be_bytes(*raw)),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<Vector3> {
        match self {
            ParamValue::Vector(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color4> {
        match self {
            ParamValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub(crate) fn read(buf: &[u8], offset: usize, param_type: ParamType) -> Result<Self> {
        Ok(match param_type {
            ParamType::Byte => ParamValue::Byte([primitive::read_u8(buf, offset)?]),
            ParamType::Short => ParamValue::Short(primitive::read_u16(buf, offset)?),
            ParamType::Number => ParamValue::Number(primitive::read_u32(buf, offset)?.to_be_bytes()),
            ParamType::Vector => ParamValue::Vector(Vector3 {
                x: primitive::read_f32(buf, offset)?,
                y: primitive::read_f32(buf, offset + 4)?,
                z: primitive::read_f32(buf, offset + 8)?,
            }),
            ParamType::Color => ParamValue::Color(Color4 {
                r: primitive::read_u32(buf, offset)?,
                g: primitive::read_u32(buf, offset + 4)?,
                b: primitive::read_u32(buf, offset + 8)?,
                a: primitive::read_u32(buf, offset + 12)?,
            }),
        })
    }

    pub(crate) fn write(&self, out: &mut BytesMut, offset: usize) {
        match self {
            ParamValue::Byte([b]) => primitive::write_u8(out, offset, *b),
            ParamValue::Short(v) => primitive::write_u16(out, offset, *v),
            ParamValue::Number(raw) => primitive::write_u32(out, offset, u32::from_be_bytes(*raw)),
            ParamValue::Vector(v) => {
                primitive::write_f32(out, offset, v.x);
                primitive::write_f32(out, offset + 4, v.y);
                primitive::write_f32(out, offset + 8, v.z);
            }
            ParamValue::Color(c) => {
                primitive::write_u32(out, offset, c.r);
                primitive::write_u32(out, offset + 4, c.g);
                primitive::write_u32(out, offset + 8, c.b);
                primitive::write_u32(out, offset + 12, c.a);
            }
        }
    }
}

/// One named parameter.
///
/// `name_length` is the on-disk width of the name. Entries built with
/// [`ParameterEntry::new`] or renamed with [`ParameterEntry::set_name`] get
/// the encoded length of their name; decoded entries keep the declared width,
/// so NUL padding inside it survives a round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterEntry {
    pub hash: u16,
    name: String,
    name_length: u16,
    pub value: ParamValue,
}

impl ParameterEntry {
    pub fn new(hash: u16, name: impl Into<String>, value: ParamValue) -> Result<Self> {
        let name = name.into();
        let name_length = name_width(&name)?;
        Ok(Self {
            hash,
            name,
            name_length,
            value,
        })
    }

    pub(crate) fn from_parts(hash: u16, name: String, name_length: u16, value: ParamValue) -> Self {
        Self {
            hash,
            name,
            name_length,
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_length(&self) -> u16 {
        self.name_length
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.name_length = name_width(&name)?;
        self.name = name;
        Ok(())
    }

    pub fn param_type(&self) -> ParamType {
        self.value.param_type()
    }

    /// Bytes this entry occupies once encoded.
    pub fn encoded_len(&self) -> usize {
        2 + 2 + self.name_length as usize + 4 + self.param_type().size()
    }
}

fn name_width(name: &str) -> Result<u16> {
    let len = text::encoded_len(name)?;
    u16::try_from(len).map_err(|_| BrickError::ValueTooLong {
        len,
        width: u16::MAX as usize,
    })
}

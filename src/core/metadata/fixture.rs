//! Minimal EXIF-bearing JPEG containers for unit and integration tests.

const TAG_MAKE: u16 = 0x010F;
const TAG_DATE_TIME: u16 = 0x0132;
const TAG_EXIF_POINTER: u16 = 0x8769;
const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;

const TYPE_ASCII: u16 = 2;
const TYPE_LONG: u16 = 4;

/// Builds a big-endian TIFF block wrapped in a JPEG APP1 segment
#[derive(Debug, Default, Clone)]
pub struct ExifJpeg {
    primary: Vec<(u16, String)>,
    exif: Vec<(u16, String)>,
    payload: Vec<u8>,
}

impl ExifJpeg {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn make(mut self, make: &str) -> Self {
        self.primary.push((TAG_MAKE, make.to_string()));
        self
    }

    pub fn date_time(mut self, value: &str) -> Self {
        self.primary.push((TAG_DATE_TIME, value.to_string()));
        self
    }

    pub fn date_time_original(mut self, value: &str) -> Self {
        self.exif.push((TAG_DATE_TIME_ORIGINAL, value.to_string()));
        self
    }

    /// Bytes stored in a comment segment, to vary content under one timestamp
    pub fn payload(mut self, payload: &[u8]) -> Self {
        self.payload = payload.to_vec();
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut primary = self.primary.clone();
        primary.sort_by_key(|(tag, _)| *tag);

        let primary_count = primary.len() + usize::from(!self.exif.is_empty());
        let exif_offset = 8 + ifd_size(primary_count);
        let mut data_offset = exif_offset
            + if self.exif.is_empty() {
                0
            } else {
                ifd_size(self.exif.len())
            };
        let mut data = Vec::new();

        let mut ifd0 = Vec::new();
        ifd0.extend((primary_count as u16).to_be_bytes());
        for (tag, text) in &primary {
            push_ascii_entry(&mut ifd0, *tag, text, &mut data, &mut data_offset);
        }
        if !self.exif.is_empty() {
            ifd0.extend(TAG_EXIF_POINTER.to_be_bytes());
            ifd0.extend(TYPE_LONG.to_be_bytes());
            ifd0.extend(1u32.to_be_bytes());
            ifd0.extend((exif_offset as u32).to_be_bytes());
        }
        ifd0.extend(0u32.to_be_bytes());

        let mut exif_ifd = Vec::new();
        if !self.exif.is_empty() {
            exif_ifd.extend((self.exif.len() as u16).to_be_bytes());
            for (tag, text) in &self.exif {
                push_ascii_entry(&mut exif_ifd, *tag, text, &mut data, &mut data_offset);
            }
            exif_ifd.extend(0u32.to_be_bytes());
        }

        let mut tiff = b"MM\x00\x2a".to_vec();
        tiff.extend(8u32.to_be_bytes());
        tiff.extend(ifd0);
        tiff.extend(exif_ifd);
        tiff.extend(data);

        let mut jpeg = vec![0xFF, 0xD8];
        jpeg.extend([0xFF, 0xE1]);
        jpeg.extend(((2 + 6 + tiff.len()) as u16).to_be_bytes());
        jpeg.extend(b"Exif\x00\x00");
        jpeg.extend(tiff);
        if !self.payload.is_empty() {
            jpeg.extend([0xFF, 0xFE]);
            jpeg.extend(((2 + self.payload.len()) as u16).to_be_bytes());
            jpeg.extend(&self.payload);
        }
        jpeg.extend([0xFF, 0xD9]);
        jpeg
    }
}

fn ifd_size(entries: usize) -> usize {
    2 + 12 * entries + 4
}

fn push_ascii_entry(
    ifd: &mut Vec<u8>,
    tag: u16,
    text: &str,
    data: &mut Vec<u8>,
    data_offset: &mut usize,
) {
    let mut bytes = text.as_bytes().to_vec();
    bytes.push(0);

    ifd.extend(tag.to_be_bytes());
    ifd.extend(TYPE_ASCII.to_be_bytes());
    ifd.extend((bytes.len() as u32).to_be_bytes());

    if bytes.len() <= 4 {
        bytes.resize(4, 0);
        ifd.extend(bytes);
    } else {
        ifd.extend((*data_offset as u32).to_be_bytes());
        *data_offset += bytes.len();
        data.extend(bytes);
    }
}

#[cfg(test)]
mod tests {
    use crate::video_pipeline::common::error::{EngineError, Result};
    use crate::video_pipeline::format::geometry::resolve;
    use crate::video_pipeline::format::negotiation::{
        can_accept_input_format, can_transform, negotiate_buffer_size, propose_output_format,
        AllocatorProperties, BufferAllocator,
    };
    use crate::video_pipeline::format::types::{
        BitmapInfoHeader, CropRect, FourCc, FrameDescriptor, MediaType, Orientation, Rect,
        Subtype, VideoInfoHeader,
    };

    struct MockAllocator {
        should_fail: bool,
        granted_size: Option<usize>,
        requests: Vec<AllocatorProperties>,
    }

    impl MockAllocator {
        fn granting(granted_size: Option<usize>) -> Self {
            Self {
                should_fail: false,
                granted_size,
                requests: Vec::new(),
            }
        }
    }

    impl BufferAllocator for MockAllocator {
        fn set_properties(&mut self, properties: &AllocatorProperties) -> Result<AllocatorProperties> {
            self.requests.push(*properties);
            if self.should_fail {
                return Err(EngineError::Allocator("Mock allocator error".to_string()));
            }
            let mut actual = *properties;
            if let Some(size) = self.granted_size {
                actual.buffer_size = size;
            }
            Ok(actual)
        }
    }

    #[test]
    fn test_top_down_full_frame_geometry() {
        for (width, height) in [(320usize, 240usize), (321, 11), (1, 1)] {
            let descriptor =
                FrameDescriptor::new(width, height, 16, Orientation::TopDown).unwrap();
            let geometry = resolve(&descriptor, false);

            assert_eq!(geometry.stride, (((width * 2) + 3) & !3) as isize);
            assert_eq!(geometry.top_offset, 0);
            assert_eq!(geometry.width, width);
            assert_eq!(geometry.height, height);
        }
    }

    #[test]
    fn test_bottom_up_full_frame_geometry() {
        let descriptor = FrameDescriptor::new(64, 48, 24, Orientation::BottomUp).unwrap();
        let geometry = resolve(&descriptor, false);

        assert_eq!(geometry.stride, -192);
        assert_eq!(geometry.top_offset, 192 * 47);
        assert_eq!(geometry.row_start(47), Some(0));
        assert_eq!(geometry.row_start(48), None);
        assert_eq!(geometry.required_len(192), Some(192 * 48));
    }

    #[test]
    fn test_yuv_layout_is_always_top_down() {
        let descriptor = FrameDescriptor::new(64, 48, 16, Orientation::BottomUp).unwrap();
        let geometry = resolve(&descriptor, true);

        assert_eq!(geometry.stride, 128);
        assert_eq!(geometry.top_offset, 0);
    }

    #[test]
    fn test_bottom_up_crop_geometry() {
        let (width, height, bpp) = (64usize, 48usize, 24usize);
        let crop = CropRect::new(2, 1, width - 2, height - 1);
        let descriptor = FrameDescriptor::new(width, height, bpp, Orientation::BottomUp)
            .unwrap()
            .with_crop(crop)
            .unwrap();
        let geometry = resolve(&descriptor, false);
        let row_bytes = descriptor.row_bytes();

        assert!(geometry.stride < 0);
        assert_eq!(geometry.row_bytes(), row_bytes);
        assert_eq!(
            geometry.top_offset,
            row_bytes * (height - crop.top - 1) + (bpp * crop.left) / 8
        );
        assert_eq!(geometry.width, width - 4);
        assert_eq!(geometry.height, height - 2);
    }

    #[test]
    fn test_top_down_crop_geometry() {
        let descriptor = FrameDescriptor::new(100, 50, 16, Orientation::BottomUp)
            .unwrap()
            .with_crop(CropRect::new(10, 5, 90, 45))
            .unwrap();
        let geometry = resolve(&descriptor, true);

        assert_eq!(geometry.stride, 200);
        assert_eq!(geometry.top_offset, 200 * 5 + 20);
        assert_eq!(geometry.width, 80);
        assert_eq!(geometry.height, 40);
    }

    #[test]
    fn test_crop_at_bottom_edge_cuts_last_row_span() {
        let descriptor = FrameDescriptor::new(8, 4, 16, Orientation::TopDown)
            .unwrap()
            .with_crop(CropRect::new(2, 1, 8, 4))
            .unwrap();
        let geometry = resolve(&descriptor, true);

        assert_eq!(geometry.top_offset, 20);
        assert_eq!(geometry.region_bytes, 12);
        assert_eq!(geometry.required_len(16), Some(64));
        assert_eq!(geometry.row_span(0, 16, 64), Some(20..36));
        assert_eq!(geometry.row_span(2, 16, 64), Some(52..64));
        assert_eq!(geometry.row_span(2, 16, 63), None);
    }

    #[test]
    fn test_sub_byte_depth_width_counts_bytes() {
        let descriptor = FrameDescriptor::new(100, 10, 12, Orientation::TopDown).unwrap();

        assert_eq!(descriptor.row_bytes(), 100);
        assert_eq!(resolve(&descriptor, false).stride, 100);
    }

    #[test]
    fn test_invalid_descriptors_rejected() {
        assert!(matches!(
            FrameDescriptor::new(0, 10, 16, Orientation::TopDown),
            Err(EngineError::InvalidDimensions(0, 10))
        ));

        let descriptor = FrameDescriptor::new(16, 16, 16, Orientation::TopDown).unwrap();
        for crop in [
            CropRect::new(4, 0, 4, 8),
            CropRect::new(0, 0, 17, 8),
            CropRect::new(0, 9, 8, 3),
            CropRect::new(0, 0, 8, 17),
        ] {
            assert!(matches!(
                descriptor.with_crop(crop),
                Err(EngineError::InvalidCrop { .. })
            ));
        }
    }

    #[test]
    fn test_descriptor_from_video_info() {
        let header = VideoInfoHeader::new(BitmapInfoHeader::yuy2(640, -480).unwrap());
        let descriptor = header.descriptor().unwrap();

        assert_eq!(descriptor.orientation(), Orientation::TopDown);
        assert_eq!(descriptor.height(), 480);
        assert_eq!(descriptor.image_size(), 640 * 2 * 480);
        assert_eq!(descriptor.crop(), None);

        let cropped = header
            .with_target(Rect::new(8, 4, 632, 476))
            .descriptor()
            .unwrap();
        assert_eq!(cropped.crop(), Some(CropRect::new(8, 4, 632, 476)));

        let negative = header.with_target(Rect::new(-2, 0, 10, 10)).descriptor();
        assert!(matches!(negative, Err(EngineError::FormatRejected(_))));
    }

    #[test]
    fn test_accepts_valid_yuy2() {
        assert!(can_accept_input_format(&MediaType::yuy2(640, 480).unwrap()));
        assert!(can_accept_input_format(&MediaType::yuy2(641, -3).unwrap()));
    }

    #[test]
    fn test_rejects_other_subtypes_and_bad_format_blocks() {
        let mut wrong_subtype = MediaType::yuy2(640, 480).unwrap();
        wrong_subtype.subtype = Subtype::Yv12;
        assert!(!can_accept_input_format(&wrong_subtype));

        let mut no_format = MediaType::yuy2(640, 480).unwrap();
        no_format.format = None;
        assert!(!can_accept_input_format(&no_format));

        let mut short_block = MediaType::yuy2(640, 480).unwrap();
        short_block.format_len = 40;
        assert!(!can_accept_input_format(&short_block));

        let mut undersized_image = BitmapInfoHeader::yuy2(640, 480).unwrap();
        undersized_image.size_image -= 1;
        let undersized =
            MediaType::video_info(Subtype::Yuy2, VideoInfoHeader::new(undersized_image));
        assert!(!can_accept_input_format(&undersized));

        let mut wrong_code = BitmapInfoHeader::yuy2(640, 480).unwrap();
        wrong_code.compression = FourCc::YV12;
        let wrong_code = MediaType::video_info(Subtype::Yuy2, VideoInfoHeader::new(wrong_code));
        assert!(!can_accept_input_format(&wrong_code));
    }

    #[test]
    fn test_can_transform() {
        let input = MediaType::yuy2(640, 480).unwrap();

        assert!(can_transform(&input, &MediaType::yuy2(640, 480).unwrap()));
        assert!(can_transform(&input, &MediaType::yuy2(704, -480).unwrap()));
        assert!(!can_transform(&input, &MediaType::yuy2(632, 480).unwrap()));
        assert!(!can_transform(&input, &MediaType::yuy2(640, 240).unwrap()));

        let mut invalid_output = MediaType::yuy2(640, 480).unwrap();
        invalid_output.subtype = Subtype::Rgb24;
        assert!(!can_transform(&input, &invalid_output));
    }

    #[test]
    fn test_top_down_input_connects_to_proposed_output() {
        let input = MediaType::yuy2(640, -480).unwrap();
        assert!(can_accept_input_format(&input));

        let proposed = propose_output_format(&input, 0).unwrap().unwrap();
        assert!(can_transform(&input, &proposed));
        assert!(can_transform(&input, &MediaType::yuy2(640, 480).unwrap()));
        assert!(!can_transform(&input, &MediaType::yuy2(640, -240).unwrap()));
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        assert!(matches!(
            BitmapInfoHeader::yuy2(70_000, 70_000),
            Err(EngineError::InvalidDimensions(70_000, 70_000))
        ));
        assert!(matches!(
            MediaType::yuy2(70_000, -70_000),
            Err(EngineError::InvalidDimensions(70_000, 70_000))
        ));
        assert!(matches!(
            FrameDescriptor::new(usize::MAX, 1, 16, Orientation::TopDown),
            Err(EngineError::InvalidDimensions(usize::MAX, 1))
        ));
        assert!(matches!(
            FrameDescriptor::new(usize::MAX / 4, 8, 16, Orientation::TopDown),
            Err(EngineError::InvalidDimensions(_, 8))
        ));

        let mut header = BitmapInfoHeader::yuy2(640, 480).unwrap();
        header.width = i32::MAX;
        header.height = i32::MAX;
        header.bit_count = u16::MAX;
        assert_eq!(header.dib_size(), None);
        let media_type = MediaType::video_info(Subtype::Yuy2, VideoInfoHeader::new(header));
        assert!(!can_accept_input_format(&media_type));
    }

    #[test]
    fn test_propose_output_format() {
        let input = MediaType::yuy2(320, 240).unwrap();

        assert_eq!(propose_output_format(&input, 0).unwrap(), Some(input.clone()));
        assert_eq!(propose_output_format(&input, 1).unwrap(), None);
        assert!(matches!(
            propose_output_format(&input, -1),
            Err(EngineError::InvalidPosition(-1))
        ));
    }

    #[test]
    fn test_buffer_negotiation_uses_upstream_size() {
        let upstream = AllocatorProperties {
            buffers: 2,
            buffer_size: 4_000_000,
            align: 16,
            prefix: 0,
        };
        let request = AllocatorProperties {
            buffers: 0,
            buffer_size: 1_000_000,
            align: 0,
            prefix: 0,
        };
        let mut allocator = MockAllocator::granting(None);

        let actual = negotiate_buffer_size(&mut allocator, &upstream, &request).unwrap();

        assert_eq!(allocator.requests.len(), 1);
        let sent = allocator.requests[0];
        assert!(sent.buffer_size >= 4_000_000);
        assert!(sent.align >= 1);
        assert_eq!(sent.buffers, 1);
        assert_eq!(actual.buffer_size, 4_000_000);
    }

    #[test]
    fn test_buffer_negotiation_keeps_larger_downstream_request() {
        let upstream = AllocatorProperties {
            buffer_size: 1_000,
            ..Default::default()
        };
        let request = AllocatorProperties {
            buffers: 3,
            buffer_size: 8_000,
            align: 4,
            prefix: 0,
        };
        let mut allocator = MockAllocator::granting(None);

        negotiate_buffer_size(&mut allocator, &upstream, &request).unwrap();

        assert_eq!(allocator.requests[0].buffer_size, 8_000);
        assert_eq!(allocator.requests[0].buffers, 3);
        assert_eq!(allocator.requests[0].align, 4);
    }

    #[test]
    fn test_buffer_negotiation_fails_when_allocator_grants_less() {
        let upstream = AllocatorProperties {
            buffer_size: 4_000_000,
            ..Default::default()
        };
        let request = AllocatorProperties {
            buffer_size: 1_000_000,
            ..Default::default()
        };
        let mut allocator = MockAllocator::granting(Some(3_999_999));

        let result = negotiate_buffer_size(&mut allocator, &upstream, &request);

        assert!(matches!(
            result,
            Err(EngineError::AllocationNegotiationFailed {
                required: 4_000_000,
                actual: 3_999_999
            })
        ));
    }

    #[test]
    fn test_buffer_negotiation_propagates_allocator_failure() {
        let mut allocator = MockAllocator {
            should_fail: true,
            granted_size: None,
            requests: Vec::new(),
        };

        let result = negotiate_buffer_size(
            &mut allocator,
            &AllocatorProperties::default(),
            &AllocatorProperties::default(),
        );

        assert!(matches!(result, Err(EngineError::Allocator(_))));
    }
}

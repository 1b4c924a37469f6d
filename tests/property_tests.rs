use image::{DynamicImage, GenericImageView};
use img_compressor::processing::resize_image;
use img_compressor::status::{Change, CompressionStatus, StatusPatch};
use img_compressor::utils::{compressed_filename, print_data_size};
use img_compressor::{CompressionOptions, FormChange, FormState, SourceFile};
use proptest::prelude::*;

fn arb_status() -> impl Strategy<Value = CompressionStatus> {
    (
        prop::option::of(0.0f64..=100.0),
        prop::option::of("[a-z]{1,8}\\.png"),
        prop::option::of(any::<u64>()),
        prop::option::of(any::<u64>()),
        "[a-zA-Z ]{0,20}",
    )
        .prop_map(
            |(progress, filename, input_size, output_size, error_message)| CompressionStatus {
                progress,
                filename,
                input_size,
                output_size,
                input_url: None,
                output_url: None,
                error_message,
            },
        )
}

proptest! {
    #[test]
    fn print_data_size_matches_megabytes(bytes in 0u64..=(1u64 << 50)) {
        let expected = format!("{:.2} MB", bytes as f64 / 1_048_576.0);
        prop_assert_eq!(print_data_size(bytes), expected);
    }

    #[test]
    fn print_data_size_whole_megabytes(mb in 0u64..=4096) {
        prop_assert_eq!(print_data_size(mb * 1_048_576), format!("{}.00 MB", mb));
    }

    #[test]
    fn compressed_filename_inserts_suffix(
        name in "[a-zA-Z0-9_ -]{1,20}",
        ext in "[a-zA-Z0-9]{1,5}"
    ) {
        let filename = format!("{}.{}", name, ext);
        prop_assert_eq!(
            compressed_filename(&filename),
            format!("{}-compressed.{}", name, ext)
        );
    }

    #[test]
    fn compressed_filename_without_extension_appends(name in "[a-zA-Z0-9_ -]{0,20}") {
        prop_assert_eq!(compressed_filename(&name), format!("{}-compressed", name));
    }

    #[test]
    fn progress_patch_changes_only_progress(
        status in arb_status(),
        percent in 0.0f64..=100.0
    ) {
        let mut merged = status.clone();
        let displaced = merged.apply(StatusPatch::progress(percent));

        prop_assert!(displaced.is_empty());
        prop_assert_eq!(merged.progress, Some(percent));
        prop_assert_eq!(CompressionStatus { progress: status.progress, ..merged }, status);
    }

    #[test]
    fn error_patch_changes_only_error(status in arb_status(), message in "[a-zA-Z ]{1,30}") {
        let mut merged = status.clone();
        merged.apply(StatusPatch::error(message.clone()));

        prop_assert_eq!(&merged.error_message, &message);
        prop_assert_eq!(
            CompressionStatus { error_message: status.error_message.clone(), ..merged },
            status
        );
    }

    #[test]
    fn empty_patch_is_identity(status in arb_status()) {
        let mut merged = status.clone();
        merged.apply(StatusPatch::default());
        prop_assert_eq!(merged, status);
    }

    #[test]
    fn size_patch_overrides(status in arb_status(), size in any::<u64>()) {
        let mut merged = status.clone();
        merged.apply(StatusPatch { output_size: Change::Set(size), ..Default::default() });
        prop_assert_eq!(merged.output_size, Some(size));
        prop_assert_eq!(merged.input_size, status.input_size);
    }

    #[test]
    fn selecting_file_leaves_numeric_fields(
        size in "[0-9]{1,3}(\\.[0-9]{1,2})?",
        dim in "[0-9]{1,5}",
        name in "[a-z]{1,8}\\.jpg"
    ) {
        let mut form = FormState::default();
        form.update(FormChange::MaxSizeMb(size.clone()));
        form.update(FormChange::MaxWidthOrHeight(dim.clone()));

        let file = SourceFile::new(name, vec![0u8; 4]);
        form.update(FormChange::Files(vec![file.clone()]));

        prop_assert_eq!(form.max_size_mb, size);
        prop_assert_eq!(form.max_width_or_height, dim);
        prop_assert_eq!(form.file, Some(file));
    }

    #[test]
    fn options_from_form_enforce_minimum_dimension(dim in 0u32..=4096) {
        let form = FormState {
            max_width_or_height: dim.to_string(),
            ..Default::default()
        };
        let result = CompressionOptions::from_form(&form);
        if dim >= 128 {
            prop_assert_eq!(result.unwrap().max_width_or_height, dim);
        } else {
            prop_assert!(result.is_err());
        }
    }

    #[test]
    fn resize_fits_longer_side(
        width in 16u32..=600u32,
        height in 16u32..=600u32,
        max in 128u32..=400u32
    ) {
        let mut img = DynamicImage::new_rgb8(width, height);
        let resized = resize_image(&mut img, max);

        let (w, h) = img.dimensions();
        prop_assert!(w <= max && h <= max);
        if resized {
            prop_assert_eq!(w.max(h), max);
        } else {
            prop_assert_eq!((w, h), (width, height));
        }
    }
}

use entity_typing::{sort_batch_by_length, TypingError};
use tch::{Device, Kind, Tensor};

#[test]
fn sorted_batch_restores_original_order() -> anyhow::Result<()> {
    let tensor = Tensor::randn([5, 4, 3], (Kind::Float, Device::Cpu));
    let lengths = Tensor::from_slice(&[2i64, 4, 1, 4, 3]);

    let sorted = sort_batch_by_length(&tensor, &lengths)?;

    assert_eq!(
        Vec::<i64>::try_from(&sorted.sorted_sequence_lengths)?,
        vec![4, 4, 3, 2, 1]
    );
    assert!(sorted
        .sorted_tensor
        .equal(&tensor.index_select(0, &sorted.permutation_index)));
    let restored = sorted
        .sorted_tensor
        .index_select(0, &sorted.restoration_indices);
    assert!(restored.equal(&tensor));
    Ok(())
}

#[test]
fn sorting_example_from_lengths() -> anyhow::Result<()> {
    let tensor = Tensor::from_slice(&[0i64, 1, 2]);
    let lengths = Tensor::from_slice(&[3i64, 1, 2]);

    let sorted = sort_batch_by_length(&tensor, &lengths)?;

    assert_eq!(Vec::<i64>::try_from(&sorted.sorted_sequence_lengths)?, vec![3, 2, 1]);
    assert_eq!(Vec::<i64>::try_from(&sorted.permutation_index)?, vec![0, 2, 1]);
    assert_eq!(Vec::<i64>::try_from(&sorted.restoration_indices)?, vec![0, 2, 1]);
    Ok(())
}

#[test]
fn lengths_must_be_a_vector() {
    let tensor = Tensor::randn([2, 3], (Kind::Float, Device::Cpu));
    let lengths = Tensor::from_slice(&[1i64, 2]).view([2, 1]);
    assert!(matches!(
        sort_batch_by_length(&tensor, &lengths),
        Err(TypingError::ValueError(_))
    ));
}
